use crate::models::Status;

/// Which listing is being dragged and which column it hovers over
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    dragged: Option<String>,
    hovered: Option<Status>,
}

impl DragState {
    pub fn dragged(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    pub fn hovered(&self) -> Option<Status> {
        self.hovered
    }

    pub(crate) fn begin(&mut self, id: &str) {
        self.dragged = Some(id.to_string());
        self.hovered = None;
    }

    pub(crate) fn hover(&mut self, status: Status) {
        self.hovered = Some(status);
    }

    /// Clear the drag, handing back the listing that was being dragged
    pub(crate) fn finish(&mut self) -> Option<String> {
        self.hovered = None;
        self.dragged.take()
    }

    pub(crate) fn cancel(&mut self) {
        self.dragged = None;
        self.hovered = None;
    }
}
