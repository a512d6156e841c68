//! Error types for the view layer.

use posts_core::ApiError;

use crate::dom::NodeId;

/// Errors raised while mounting or updating a page.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The host document lacks an element the page needs.
    #[error("no element with id `{0}` in the document")]
    MissingElement(String),

    /// Appending would make a node its own ancestor.
    #[error("cannot append {child} under {parent}: {child} is an ancestor")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// A call to the posts API failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}
