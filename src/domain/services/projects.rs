#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;

use crate::domain::models::Project;

/// Client-side view over the persisted projects: the fetched list, the
/// selection, an optional open detail view, and the armed-delete protocol.
/// The list is a read-through cache only: it is re-fetched on every entry and
/// after every delete, never trusted across them.
#[derive(Default)]
pub struct ProjectBrowser {
    projects: Vec<Project>,
    loading: bool,
    selected: usize,
    detail: Option<String>,
    list_error: Option<String>,
    action_error: Option<String>,
    notice: Option<String>,
    pending_delete: Option<String>,
}

impl ProjectBrowser {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.list_error = None;
        self.action_error = None;
        self.pending_delete = None;
    }

    /// Replaces the cached list. An empty list is a valid result and renders
    /// as the empty state, not as an error. If the open detail view's subject
    /// is gone from the fresh list, the view closes with it.
    pub fn apply_list(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.loading = false;
        self.list_error = None;

        if !self.projects.is_empty() && self.selected >= self.projects.len() {
            self.selected = self.projects.len() - 1;
        }

        if let Some(detail_id) = &self.detail {
            let still_there = self
                .projects
                .iter()
                .any(|project| return &project.generation_id == detail_id);
            if !still_there {
                self.detail = None;
            }
        }
    }

    pub fn apply_list_error(&mut self, message: &str) {
        self.loading = false;
        self.list_error = Some(message.to_string());
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.projects.len() {
            self.selected += 1;
        }
        self.pending_delete = None;
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.pending_delete = None;
    }

    pub fn selected_project(&self) -> Option<&Project> {
        return self.projects.get(self.selected);
    }

    pub fn open_detail(&mut self) {
        let selected_id = self
            .selected_project()
            .map(|project| return project.generation_id.to_string());
        if selected_id.is_some() {
            self.detail = selected_id;
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// The project the detail view shows, when one is open. Always resolved
    /// against the current list so a stale id can never render.
    pub fn detail_project(&self) -> Option<&Project> {
        let detail_id = self.detail.as_ref()?;
        return self
            .projects
            .iter()
            .find(|project| return &project.generation_id == detail_id);
    }

    /// First half of the two-step delete: arms the delete for the project the
    /// user is looking at (detail subject when the detail view is open,
    /// otherwise the list selection).
    pub fn arm_delete(&mut self) -> Option<&Project> {
        let target_id = match &self.detail {
            Some(detail_id) => Some(detail_id.to_string()),
            None => self
                .selected_project()
                .map(|project| return project.generation_id.to_string()),
        };

        self.pending_delete = target_id.filter(|id| {
            return self
                .projects
                .iter()
                .any(|project| return &project.generation_id == id);
        });
        if self.pending_delete.is_some() {
            self.action_error = None;
        }

        return self.pending_armed();
    }

    /// Second half: hands out the armed id exactly once.
    pub fn confirm_delete(&mut self) -> Option<String> {
        return self.pending_delete.take();
    }

    pub fn disarm_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_armed(&self) -> Option<&Project> {
        let pending_id = self.pending_delete.as_ref()?;
        return self
            .projects
            .iter()
            .find(|project| return &project.generation_id == pending_id);
    }

    /// A confirmed delete: the entry leaves the in-memory cache immediately
    /// and, if the detail view was showing it, the detail view closes. The
    /// engine re-fetches the list right after, which lands in `apply_list`.
    pub fn apply_deleted(&mut self, generation_id: &str) {
        self.projects
            .retain(|project| return project.generation_id != generation_id);

        if !self.projects.is_empty() && self.selected >= self.projects.len() {
            self.selected = self.projects.len() - 1;
        }

        if self.detail.as_deref() == Some(generation_id) {
            self.detail = None;
        }

        self.notice = Some("Project deleted successfully!".to_string());
    }

    /// A failed per-project action (delete, download). The list itself stays
    /// intact.
    pub fn apply_action_error(&mut self, message: &str) {
        self.action_error = Some(message.to_string());
    }

    pub fn set_notice(&mut self, message: &str) {
        self.notice = Some(message.to_string());
        self.action_error = None;
    }

    pub fn projects(&self) -> &[Project] {
        return self.projects.as_slice();
    }

    pub fn selected_index(&self) -> usize {
        return self.selected;
    }

    pub fn is_loading(&self) -> bool {
        return self.loading;
    }

    pub fn is_empty(&self) -> bool {
        return !self.loading && self.list_error.is_none() && self.projects.is_empty();
    }

    pub fn list_error(&self) -> Option<&str> {
        return self.list_error.as_deref();
    }

    pub fn action_error(&self) -> Option<&str> {
        return self.action_error.as_deref();
    }

    pub fn notice(&self) -> Option<&str> {
        return self.notice.as_deref();
    }
}
