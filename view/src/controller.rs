//! The page: loads posts on start and reacts to clicks.
//!
//! # Design
//! Buttons carry a `Listener` value instead of a closure. `PostsPage::click`
//! looks those values up and runs the matching handler with full `&mut`
//! access to the document, the API and the prompter. Every handler swallows
//! its failure after logging it, so a failed action leaves the page as it was.

use std::collections::BTreeMap;

use posts_core::NewPost;

use crate::api::PostsApi;
use crate::dom::{Document, NodeId};
use crate::error::ViewError;
use crate::prompt::Prompter;
use crate::renderer::{create_post_item, edit_post_item, PostItem};
use crate::transport::Transport;

/// Id of the list the posts are rendered into.
pub const POSTS_LIST_ID: &str = "posts-list";
/// Id of the button that adds a post.
pub const ADD_POST_ID: &str = "add-post";
/// Author attached to every post created from the page.
pub const NEW_POST_USER_ID: u64 = 1;

/// What a click on a node should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    AddPost,
    /// Edit the post rendered by the given `li`.
    EditPost(NodeId),
    /// Delete the post rendered by the given `li`.
    DeletePost(NodeId),
}

/// A document containing the two elements a page mounts onto.
pub fn page_skeleton() -> Result<Document<Listener>, ViewError> {
    let mut document = Document::with_body();
    let root = document.root();

    let add_button = document.create_element("button");
    document.set_id(add_button, ADD_POST_ID);
    document.set_text_content(add_button, "Add Post");

    let list = document.create_element("ul");
    document.set_id(list, POSTS_LIST_ID);

    document.append_child(root, add_button)?;
    document.append_child(root, list)?;
    Ok(document)
}

pub struct PostsPage<T, P> {
    document: Document<Listener>,
    api: PostsApi<T>,
    prompter: P,
    container: NodeId,
    add_button: NodeId,
    items: BTreeMap<NodeId, PostItem>,
}

impl<T: Transport, P: Prompter> PostsPage<T, P> {
    /// Build a page around explicit container and button nodes.
    pub fn new(
        mut document: Document<Listener>,
        api: PostsApi<T>,
        prompter: P,
        container: NodeId,
        add_button: NodeId,
    ) -> Self {
        document.add_event_listener(add_button, Listener::AddPost);
        Self {
            document,
            api,
            prompter,
            container,
            add_button,
            items: BTreeMap::new(),
        }
    }

    /// Build a page around the `posts-list` and `add-post` elements of
    /// `document`.
    pub fn mount(
        document: Document<Listener>,
        api: PostsApi<T>,
        prompter: P,
    ) -> Result<Self, ViewError> {
        let container = document
            .get_element_by_id(POSTS_LIST_ID)
            .ok_or_else(|| ViewError::MissingElement(POSTS_LIST_ID.to_string()))?;
        let add_button = document
            .get_element_by_id(ADD_POST_ID)
            .ok_or_else(|| ViewError::MissingElement(ADD_POST_ID.to_string()))?;
        Ok(Self::new(document, api, prompter, container, add_button))
    }

    pub fn document(&self) -> &Document<Listener> {
        &self.document
    }

    pub fn api(&self) -> &PostsApi<T> {
        &self.api
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn prompter_mut(&mut self) -> &mut P {
        &mut self.prompter
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn add_button(&self) -> NodeId {
        self.add_button
    }

    /// Rendered posts in the order they appear in the list.
    pub fn items(&self) -> Vec<&PostItem> {
        self.document
            .children(self.container)
            .iter()
            .filter_map(|node| self.items.get(node))
            .collect()
    }

    /// Fetch the first page of posts and render them.
    pub fn init(&mut self) {
        match self.load() {
            Ok(count) => tracing::info!(count, "rendered posts"),
            Err(err) => tracing::error!(error = %err, "failed to initialize"),
        }
    }

    fn load(&mut self) -> Result<usize, ViewError> {
        let posts = self.api.fetch_posts()?;
        let count = posts.len();
        for post in posts {
            self.render(post)?;
        }
        Ok(count)
    }

    fn render(&mut self, post: posts_core::Post) -> Result<(), ViewError> {
        let item = create_post_item(&mut self.document, self.container, post)?;
        self.items.insert(item.item, item);
        Ok(())
    }

    /// Dispatch a click on `node` to its listeners. Clicks on detached nodes
    /// are ignored.
    pub fn click(&mut self, node: NodeId) {
        if !self.document.is_connected(node) {
            tracing::debug!(%node, "ignoring click on detached node");
            return;
        }
        let listeners = self.document.listeners(node).to_vec();
        for listener in listeners {
            match listener {
                Listener::AddPost => self.add_post_clicked(),
                Listener::EditPost(item) => self.edit_clicked(item),
                Listener::DeletePost(item) => self.delete_clicked(item),
            }
        }
    }

    /// Ask for a title and body and create the post when both are non-empty.
    pub fn add_post_clicked(&mut self) {
        let title = self.prompter.prompt("Enter post title:", None);
        let body = self.prompter.prompt("Enter post body:", None);

        let (Some(title), Some(body)) = (title, body) else {
            tracing::debug!("add cancelled");
            return;
        };
        if title.is_empty() || body.is_empty() {
            tracing::debug!("add skipped, title or body empty");
            return;
        }

        let new_post = NewPost::new(title, body, NEW_POST_USER_ID);
        let result = self
            .api
            .add_post(&new_post)
            .map_err(ViewError::from)
            .and_then(|post| self.render(post));
        if let Err(err) = result {
            tracing::error!(error = %err, "failed to add post");
        }
    }

    /// Edit the post shown by `item` in place.
    pub fn edit_clicked(&mut self, item: NodeId) {
        let Some(entry) = self.items.get_mut(&item) else {
            tracing::debug!(%item, "no post rendered by this item");
            return;
        };
        if edit_post_item(
            &mut self.prompter,
            &mut self.document,
            &mut entry.post,
            entry.title,
            entry.body,
        ) {
            tracing::debug!(id = entry.post.id, "edited post locally");
        }
    }

    /// Delete the post shown by `item`, removing the item once the server
    /// agrees.
    pub fn delete_clicked(&mut self, item: NodeId) {
        let Some(id) = self.items.get(&item).map(|entry| entry.post.id) else {
            tracing::debug!(%item, "no post rendered by this item");
            return;
        };
        match self.api.delete_post(id) {
            Ok(()) => {
                self.document.remove(item);
                self.items.remove(&item);
            }
            Err(err) => tracing::error!(error = %err, id, "failed to delete post"),
        }
    }
}

#[cfg(test)]
mod tests {
    use posts_core::{HttpMethod, PostsClient};

    use super::*;
    use crate::prompt::ScriptedPrompter;
    use crate::testing::FakeServer;

    type Page = PostsPage<FakeServer, ScriptedPrompter>;

    fn page(server: FakeServer) -> Page {
        let api = PostsApi::new(PostsClient::new("http://fake/posts"), server);
        PostsPage::mount(page_skeleton().unwrap(), api, ScriptedPrompter::default()).unwrap()
    }

    #[test]
    fn skeleton_has_list_and_add_button() {
        let document = page_skeleton().unwrap();
        let list = document.get_element_by_id(POSTS_LIST_ID).unwrap();
        let button = document.get_element_by_id(ADD_POST_ID).unwrap();
        assert_eq!(document.tag(list), "ul");
        assert_eq!(document.tag(button), "button");
        assert_eq!(document.text_content(button), "Add Post");
        assert_eq!(document.children(document.root()), &[button, list]);
    }

    fn titles(page: &Page) -> Vec<String> {
        page.items()
            .iter()
            .map(|item| page.document().text_content(item.title))
            .collect()
    }

    fn requests(page: &Page) -> usize {
        page.api().transport().requests.len()
    }

    #[test]
    fn mount_fails_without_list() {
        let mut document = Document::with_body();
        let button = document.create_element("button");
        document.set_id(button, ADD_POST_ID);
        document.append_child(document.root(), button).unwrap();

        let api = PostsApi::new(PostsClient::default(), FakeServer::default());
        let err = PostsPage::mount(document, api, ScriptedPrompter::default())
            .err()
            .unwrap();
        assert!(matches!(err, ViewError::MissingElement(id) if id == POSTS_LIST_ID));
    }

    #[test]
    fn mount_fails_without_add_button() {
        let mut document = Document::with_body();
        let list = document.create_element("ul");
        document.set_id(list, POSTS_LIST_ID);
        document.append_child(document.root(), list).unwrap();

        let api = PostsApi::new(PostsClient::default(), FakeServer::default());
        let err = PostsPage::mount(document, api, ScriptedPrompter::default())
            .err()
            .unwrap();
        assert!(matches!(err, ViewError::MissingElement(id) if id == ADD_POST_ID));
    }

    #[test]
    fn init_renders_first_two_posts() {
        let mut page = page(FakeServer::with_posts(4));
        page.init();

        assert_eq!(titles(&page), vec!["Post 1", "Post 2"]);
        assert_eq!(page.document().children(page.container()).len(), 2);
    }

    #[test]
    fn init_failure_renders_nothing() {
        let mut server = FakeServer::with_posts(2);
        server.fail_with = Some(503);
        let mut page = page(server);
        page.init();

        assert!(page.items().is_empty());
        assert!(page.document().children(page.container()).is_empty());
    }

    #[test]
    fn add_click_creates_and_renders_post() {
        let mut page = page(FakeServer::with_posts(2));
        page.init();
        page.prompter_mut().push(Some("Fresh"));
        page.prompter_mut().push(Some("Content"));

        page.click(page.add_button());

        assert_eq!(titles(&page), vec!["Post 1", "Post 2", "Fresh"]);
        let added = page.items()[2];
        assert_eq!(added.post.id, 3);
        assert_eq!(added.post.user_id, NEW_POST_USER_ID);
        assert_eq!(page.document().text_content(added.body), "Content");
        assert_eq!(
            page.prompter().asked(),
            &[
                ("Enter post title:".to_string(), None),
                ("Enter post body:".to_string(), None),
            ]
        );
    }

    #[test]
    fn add_with_missing_or_empty_answer_sends_nothing() {
        let cases = [
            [None, Some("b")],
            [Some("a"), None],
            [Some(""), Some("b")],
            [Some("a"), Some("")],
        ];
        for answers in cases {
            let mut page = page(FakeServer::default());
            for answer in answers {
                page.prompter_mut().push(answer);
            }

            page.click(page.add_button());

            assert_eq!(requests(&page), 0);
            assert!(page.items().is_empty());
        }
    }

    #[test]
    fn add_failure_leaves_list_untouched() {
        let mut server = FakeServer::default();
        server.fail_with = Some(500);
        let mut page = page(server);
        page.prompter_mut().push(Some("t"));
        page.prompter_mut().push(Some("b"));

        page.click(page.add_button());

        assert_eq!(requests(&page), 1);
        assert!(page.items().is_empty());
    }

    #[test]
    fn edit_click_updates_text_without_network() {
        let mut page = page(FakeServer::with_posts(2));
        page.init();
        let edit = page.items()[1].edit_button;
        page.prompter_mut().push(Some("Renamed"));
        page.prompter_mut().push(Some("Rewritten"));

        page.click(edit);

        let item = page.items()[1];
        assert_eq!(item.post.title, "Renamed");
        assert_eq!(item.post.body, "Rewritten");
        assert_eq!(page.document().text_content(item.title), "Renamed");
        assert_eq!(page.document().text_content(item.body), "Rewritten");
        assert_eq!(requests(&page), 1, "only the initial fetch");
    }

    #[test]
    fn cancelled_edit_keeps_post() {
        let mut page = page(FakeServer::with_posts(1));
        page.init();
        let before = page.items()[0].clone();
        page.prompter_mut().push(Some("Renamed"));
        page.prompter_mut().push(None);

        page.click(before.edit_button);

        assert_eq!(page.items()[0], &before);
        assert_eq!(page.document().text_content(before.title), "Post 1");
    }

    #[test]
    fn delete_click_removes_item_after_success() {
        let mut page = page(FakeServer::with_posts(2));
        page.init();
        let first = page.items()[0].clone();

        page.click(first.delete_button);

        assert_eq!(titles(&page), vec!["Post 2"]);
        assert!(!page.document().is_connected(first.item));
        let sent = page.api().transport().requests.last().unwrap();
        assert_eq!(sent.method, HttpMethod::Delete);
        assert_eq!(sent.path, "http://fake/posts/1");
    }

    #[test]
    fn failed_delete_keeps_item() {
        let mut page = page(FakeServer::with_posts(2));
        page.init();
        page.api.transport_mut().fail_with = Some(500);
        let first = page.items()[0].clone();

        page.click(first.delete_button);

        assert_eq!(titles(&page), vec!["Post 1", "Post 2"]);
        assert!(page.document().is_connected(first.item));
    }

    #[test]
    fn clicks_on_removed_buttons_are_ignored() {
        let mut page = page(FakeServer::with_posts(2));
        page.init();
        let first = page.items()[0].clone();
        page.click(first.delete_button);
        let sent = requests(&page);

        page.click(first.delete_button);
        page.click(first.edit_button);

        assert_eq!(requests(&page), sent);
        assert_eq!(page.prompter().asked().len(), 0);
    }

    #[test]
    fn duplicate_server_ids_render_as_separate_items() {
        let mut server = FakeServer::default();
        server.fixed_id = Some(101);
        let mut page = page(server);
        for _ in 0..2 {
            page.prompter_mut().push(Some("same"));
            page.prompter_mut().push(Some("id"));
            page.click(page.add_button());
        }

        let items = page.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].post.id, items[1].post.id);
        assert_ne!(items[0].item, items[1].item);
    }
}
