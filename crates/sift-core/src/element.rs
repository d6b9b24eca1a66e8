//! Document handles.
//!
//! The core only consumes these capabilities; drivers (live browsers, static
//! HTML trees) implement them. Every effect receives the caller's context and
//! must honor its cancellation and deadline.

use std::fmt::Debug;
use std::sync::Arc;

use crate::Result;
use crate::context::Context;

pub type ElementRef = Arc<dyn HtmlElement>;
pub type DocumentRef = Arc<dyn HtmlDocument>;

pub trait HtmlElement: Debug + Send + Sync {
    /// Removes every named attribute from the element.
    fn remove_attribute(&self, ctx: &Context, names: &[String]) -> Result<()>;

    fn get_attribute(&self, ctx: &Context, name: &str) -> Result<Option<String>>;

    fn set_attribute(&self, ctx: &Context, name: &str, value: &str) -> Result<()>;
}

pub trait HtmlDocument: Debug + Send + Sync {
    /// Root element of the document.
    fn element(&self) -> ElementRef;
}
