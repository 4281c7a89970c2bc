//! Display configuration options for fsc
//!
//! Controls what each row of the entry list shows and whether the key hint footer is drawn.

use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Display {
    icons: bool,
    show_size: bool,
    show_modified: bool,
    show_footer: bool,
}

impl Display {
    pub fn icons(&self) -> bool {
        self.icons
    }

    pub fn show_size(&self) -> bool {
        self.show_size
    }

    pub fn show_modified(&self) -> bool {
        self.show_modified
    }

    pub fn show_footer(&self) -> bool {
        self.show_footer
    }
}

impl Default for Display {
    fn default() -> Self {
        Display {
            icons: true,
            show_size: true,
            show_modified: true,
            show_footer: true,
        }
    }
}
