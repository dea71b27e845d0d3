use serde_derive::Deserialize;
use serde_derive::Serialize;

/// The identity the service hands back on login. The email scopes project
/// list and delete authorization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

impl UserIdentity {
    pub fn display_name(&self) -> String {
        return format!("{} {}", self.firstname, self.lastname);
    }
}
