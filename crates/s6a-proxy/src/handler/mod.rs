//! Answer handling: translation and posting.

pub mod completion;
pub mod translator;

pub use completion::{CompletionHandler, RequestContext};
pub use translator::ResponseTranslator;
