use tracing::warn;

use upeer_client::ClientError;
use upeer_client::services::CommentService;
use upeer_types::models::Comment;

use crate::list::SyncedList;

/// One node of a rendered comment tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    fn leaf(comment: Comment) -> Self {
        Self {
            comment,
            replies: Vec::new(),
        }
    }
}

/// Tree rendering of a thread. Replies whose parent could not be located
/// end up in `orphaned` — surfaced as a recoverable inconsistency, never
/// silently discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadView {
    pub roots: Vec<CommentNode>,
    pub orphaned: Vec<Comment>,
}

/// The comment thread of one post. The flat list is authoritative local
/// state; the tree is derived on demand.
pub struct CommentThread {
    comments: CommentService,
    post_id: i64,
    list: SyncedList<Comment>,
}

impl CommentThread {
    pub fn new(comments: CommentService, post_id: i64) -> Self {
        Self {
            comments,
            post_id,
            list: SyncedList::new(),
        }
    }

    pub fn post_id(&self) -> i64 {
        self.post_id
    }

    pub fn comments(&self) -> &SyncedList<Comment> {
        &self.list
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let items = self.comments.for_post(self.post_id).await?;
        self.list.replace(items);
        Ok(())
    }

    /// Top-level comment.
    pub async fn add(&mut self, content: &str) -> Result<Comment, ClientError> {
        let comment = self.comments.create(self.post_id, content, None).await?;
        self.list.append(comment.clone());
        Ok(comment)
    }

    /// Reply under an existing comment. Refuses up front when the parent
    /// is not part of this thread, before anything goes on the wire.
    pub async fn reply(&mut self, parent_id: i64, content: &str) -> Result<Comment, ClientError> {
        if !self.list.contains(parent_id) {
            return Err(ClientError::Precondition(format!(
                "reply parent {parent_id} is not part of this thread"
            )));
        }
        let comment = self
            .comments
            .create(self.post_id, content, Some(parent_id))
            .await?;
        self.list.append(comment.clone());
        Ok(comment)
    }

    pub async fn edit(&mut self, comment_id: i64, content: &str) -> Result<Comment, ClientError> {
        let comment = self.comments.update(comment_id, content).await?;
        self.list.update(comment.clone());
        Ok(comment)
    }

    /// Removes only the comment itself; descendants surface as orphans in
    /// the next `tree()` until a refresh reconciles with the server's
    /// cascade.
    pub async fn delete(&mut self, comment_id: i64) -> Result<(), ClientError> {
        self.comments.delete(comment_id).await?;
        self.list.remove(comment_id);
        Ok(())
    }

    /// Build the reply tree from the flat list, preserving list order at
    /// every level.
    pub fn tree(&self) -> ThreadView {
        build_tree(self.list.snapshot())
    }
}

fn build_tree(comments: Vec<Comment>) -> ThreadView {
    let mut view = ThreadView::default();
    for comment in comments {
        match comment.parent_id {
            None => view.roots.push(CommentNode::leaf(comment)),
            Some(parent_id) => {
                if !insert_reply(&mut view.roots, parent_id, &comment) {
                    warn!(
                        "comment {} references missing parent {} on post {}",
                        comment.comment_id, parent_id, comment.post_id
                    );
                    view.orphaned.push(comment);
                }
            }
        }
    }
    view
}

/// Recursive walk matching on parent id; true if the reply found its
/// parent anywhere in the forest.
fn insert_reply(nodes: &mut Vec<CommentNode>, parent_id: i64, reply: &Comment) -> bool {
    for node in nodes {
        if node.comment.comment_id == parent_id {
            node.replies.push(CommentNode::leaf(reply.clone()));
            return true;
        }
        if insert_reply(&mut node.replies, parent_id, reply) {
            return true;
        }
    }
    false
}
