//! Cortex Termio: the terminal I/O protocol layer.
//!
//! Turns raw terminal input into typed events and drawing requests into
//! terminal-specific escape sequences. The work is split across four crates,
//! re-exported here:
//!
//! - [`input`]: mouse, focus and bracketed-paste decoding
//! - [`terminfo`]: built-in capability profiles with name fallback
//! - [`color`]: RGB, HSL, 256-color and truecolor conversion
//! - [`image`]: image backend selection and protocol encoders
//!
//! [`TerminalSession`] wires them together for one terminal, driven by a
//! [`TermioConfig`].
//!
//! # Example
//!
//! ```
//! use cortex_termio::prelude::*;
//!
//! let env = EnvSnapshot::from_pairs([("TERM", "xterm-kitty")]);
//! let mut session = TerminalSession::new(env, &TermioConfig::default()).unwrap();
//! assert_eq!(session.backend().kind(), BackendKind::Kitty);
//!
//! let feed = session.feed(b"\x1b[<0;10;20M");
//! let Some(InputEvent::Mouse(mouse)) = feed.event else { panic!() };
//! assert_eq!(mouse.position(), (9, 19));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

pub use cortex_termio_color as color;
pub use cortex_termio_image as image;
pub use cortex_termio_input as input;
pub use cortex_termio_terminfo as terminfo;

pub mod config;
pub mod logging;
pub mod session;

// Re-export commonly used items at the crate root for convenience
pub use config::{ConfigError, TermioConfig};
pub use logging::{init_logging, try_init_logging};
pub use session::{Feed, TerminalSession};

pub mod prelude {
    //! Common imports.

    pub use crate::config::TermioConfig;
    pub use crate::session::{Feed, TerminalSession};
    pub use cortex_termio_color::{parse_color, ColorValue, Rgb};
    pub use cortex_termio_image::{
        Backend, BackendKind, Dimension, EnvSnapshot, Image, ImageBackend, Placement, Region,
    };
    pub use cortex_termio_input::{
        FocusEvent, InputEvent, MouseAction, MouseButton, MouseEvent, MouseModifiers, PasteEvent,
        PasteState,
    };
    pub use cortex_termio_terminfo::{get_best_builtin_terminfo, TerminalCapabilities};
}
