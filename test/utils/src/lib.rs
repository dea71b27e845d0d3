/// The 8 byte PNG magic followed by filler. Enough for upload plumbing that
/// only inspects declared type, extension, and length.
pub fn diagram_fixture() -> Vec<u8> {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 56]);
    return bytes;
}

pub fn code_fixture() -> &'static str {
    return r#"
class Order:
    def __init__(self, customer):
        self.customer = customer
        self.items = []

    def add_item(self, item):
        self.items.append(item)

    def total(self):
        return sum(item.price for item in self.items)
"#
    .trim();
}

/// A project record as the service returns it from the list endpoint, with
/// the binary diagram excluded.
pub fn project_fixture_json(generation_id: &str, user_email: &str) -> serde_json::Value {
    return serde_json::json!({
        "generation_id": generation_id,
        "user_email": user_email,
        "pdf_filename": "checkout-flow.png",
        "output_filename": "checkout_flow.py",
        "target_language": "python",
        "ai_explanation": "The diagram models an order checkout process.",
        "ai_generated_code": code_fixture(),
        "created_at": "2026-05-11T09:14:02",
        "updated_at": "2026-05-11T09:14:02",
    });
}
