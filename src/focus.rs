/// Host-side focus registry: tracks which widget currently holds input
/// focus, in registration (tab) order.
#[derive(Debug, Default)]
pub struct FocusState {
    order: Vec<String>,
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a widget to the tab order. Re-registering an id is a no-op.
    pub fn register(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.order.contains(&id) {
            self.order.push(id);
        }
    }

    /// Get the currently focused widget ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focused.as_deref() == Some(id)
    }

    /// Programmatically focus a widget by ID.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        if self.focused.is_some() {
            self.focused = None;
            true
        } else {
            false
        }
    }

    /// Focus the next widget in tab order, wrapping.
    /// Returns the newly focused ID if focus changed.
    pub fn focus_next(&mut self) -> Option<String> {
        if self.order.is_empty() {
            return None;
        }

        let new_focus = match &self.focused {
            None => self.order[0].clone(),
            Some(current) => {
                let idx = self.order.iter().position(|id| id == current);
                match idx {
                    Some(i) => self.order[(i + 1) % self.order.len()].clone(),
                    None => self.order[0].clone(),
                }
            }
        };

        if self.focused.as_ref() != Some(&new_focus) {
            self.focused = Some(new_focus.clone());
            Some(new_focus)
        } else {
            None
        }
    }

    /// Focus the previous widget in tab order, wrapping.
    /// Returns the newly focused ID if focus changed.
    pub fn focus_prev(&mut self) -> Option<String> {
        if self.order.is_empty() {
            return None;
        }

        let new_focus = match &self.focused {
            None => self.order[self.order.len() - 1].clone(),
            Some(current) => {
                let idx = self.order.iter().position(|id| id == current);
                match idx {
                    Some(0) => self.order[self.order.len() - 1].clone(),
                    Some(i) => self.order[i - 1].clone(),
                    None => self.order[self.order.len() - 1].clone(),
                }
            }
        };

        if self.focused.as_ref() != Some(&new_focus) {
            self.focused = Some(new_focus.clone());
            Some(new_focus)
        } else {
            None
        }
    }
}
