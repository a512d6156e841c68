//! Building and updating the list item that shows one post.

use posts_core::Post;

use crate::controller::Listener;
use crate::dom::{Document, NodeId};
use crate::error::ViewError;
use crate::prompt::Prompter;

const ITEM_CLASSES: &[&str] = &[
    "border",
    "border-gray-700",
    "p-4",
    "hover:bg-gray-700",
    "transition",
    "rounded",
    "cursor-pointer",
];
const TITLE_CLASSES: &[&str] = &["text-lg", "font-bold"];
const EDIT_BUTTON_CLASSES: &[&str] = &[
    "mt-2",
    "mr-2",
    "px-3",
    "py-2",
    "bg-green-600",
    "text-white",
    "rounded",
    "hover:bg-green-400",
    "focus:outline-none",
    "focus:ring",
    "cursor-pointer",
];
const DELETE_BUTTON_CLASSES: &[&str] = &[
    "mt-2",
    "px-3",
    "py-2",
    "bg-yellow-600",
    "text-white",
    "rounded",
    "hover:bg-yellow-400",
    "focus:outline-none",
    "focus:ring",
    "cursor-pointer",
];

/// A rendered post: the model copy plus the nodes that display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostItem {
    pub post: Post,
    pub item: NodeId,
    pub title: NodeId,
    pub body: NodeId,
    pub edit_button: NodeId,
    pub delete_button: NodeId,
}

/// Build the `li` for `post`, wire its buttons and append it to `container`.
///
/// The buttons' listeners refer to the new `li`, which is how the page finds
/// the item again when they are clicked.
pub fn create_post_item(
    document: &mut Document<Listener>,
    container: NodeId,
    post: Post,
) -> Result<PostItem, ViewError> {
    let item = document.create_element("li");
    document.add_classes(item, ITEM_CLASSES);

    let title = document.create_element("h3");
    document.set_text_content(title, &post.title);
    document.add_classes(title, TITLE_CLASSES);

    let body = document.create_element("p");
    document.set_text_content(body, &post.body);

    let edit_button = document.create_element("button");
    document.set_text_content(edit_button, "Edit");
    document.add_classes(edit_button, EDIT_BUTTON_CLASSES);
    document.add_event_listener(edit_button, Listener::EditPost(item));

    let delete_button = document.create_element("button");
    document.set_text_content(delete_button, "Delete");
    document.add_classes(delete_button, DELETE_BUTTON_CLASSES);
    document.add_event_listener(delete_button, Listener::DeletePost(item));

    for child in [title, body, edit_button, delete_button] {
        document.append_child(item, child)?;
    }
    document.append_child(container, item)?;

    Ok(PostItem {
        post,
        item,
        title,
        body,
        edit_button,
        delete_button,
    })
}

/// Ask for a new title and body, then apply both to the model and the text
/// nodes. Nothing changes unless both prompts are answered.
///
/// Returns whether the post was changed. The server is not told.
pub fn edit_post_item<L, P: Prompter>(
    prompter: &mut P,
    document: &mut Document<L>,
    post: &mut Post,
    title: NodeId,
    body: NodeId,
) -> bool {
    let new_title = prompter.prompt("Edit Post Title:", Some(post.title.as_str()));
    let new_body = prompter.prompt("Edit Post Body:", Some(post.body.as_str()));

    let (Some(new_title), Some(new_body)) = (new_title, new_body) else {
        return false;
    };

    document.set_text_content(title, &new_title);
    document.set_text_content(body, &new_body);
    post.title = new_title;
    post.body = new_body;
    true
}
