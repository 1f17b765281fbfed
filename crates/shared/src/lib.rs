//! Poll composition shared by the server and the terminal client: the draft
//! model, its option slots, and the normalization applied before a poll is
//! stored.

pub mod draft;
pub mod error;
pub mod normalize;
pub mod options;
pub mod palette;
pub mod payload;
pub mod protection;

pub use draft::{PollDraft, Theme};
pub use error::DraftError;
pub use normalize::normalize;
pub use options::{OptionKey, OptionList};
pub use palette::Rgb;
pub use payload::CreatePollInput;
pub use protection::Protection;
