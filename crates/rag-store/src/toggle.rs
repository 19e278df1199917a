//! Open/closed view flags.

use std::sync::atomic::{AtomicBool, Ordering};

/// A named boolean cell, closed when created.
#[derive(Debug)]
pub struct Toggle {
    name: &'static str,
    open: AtomicBool,
}

impl Toggle {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            open: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    /// Flip the flag and return the new state.
    pub fn toggle(&self) -> bool {
        !self.open.fetch_xor(true, Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

/// The dashboard's view flags.
#[derive(Debug)]
pub struct ViewToggles {
    pub questions_modal: Toggle,
    pub annotations_modal: Toggle,
    pub sidebar: Toggle,
    pub gradient_background: Toggle,
}

impl Default for ViewToggles {
    fn default() -> Self {
        Self {
            questions_modal: Toggle::new("questionsModal"),
            annotations_modal: Toggle::new("annotationsModal"),
            sidebar: Toggle::new("sidebarToggle"),
            gradient_background: Toggle::new("morphingGradientBgToggle"),
        }
    }
}

impl ViewToggles {
    /// Name and state of every flag.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(&'static str, bool)> {
        [
            &self.questions_modal,
            &self.annotations_modal,
            &self.sidebar,
            &self.gradient_background,
        ]
        .into_iter()
        .map(|t| (t.name(), t.is_open()))
        .collect()
    }
}
