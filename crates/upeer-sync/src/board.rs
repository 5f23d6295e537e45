use upeer_client::ClientError;
use upeer_client::services::{GroupService, PostFilter, PostService};
use upeer_types::api::JoinGroupResponse;
use upeer_types::models::{Post, PostType};

use crate::list::SyncedList;

/// The post board: owns the filtered post list for its lifetime and
/// patches it from server-confirmed responses.
pub struct PostBoard {
    posts: PostService,
    groups: GroupService,
    filter: PostFilter,
    list: SyncedList<Post>,
}

impl PostBoard {
    pub fn new(posts: PostService, groups: GroupService) -> Self {
        Self {
            posts,
            groups,
            filter: PostFilter::default(),
            list: SyncedList::new(),
        }
    }

    pub fn posts(&self) -> &SyncedList<Post> {
        &self.list
    }

    pub fn filter(&self) -> PostFilter {
        self.filter
    }

    /// Changing the filter is a dependency change: re-fetch wholesale.
    pub async fn set_filter(&mut self, filter: PostFilter) -> Result<(), ClientError> {
        self.filter = filter;
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let items = self.posts.list(&self.filter).await?;
        self.list.replace(items);
        Ok(())
    }

    /// Prepends the server-canonical post once the server confirms; no
    /// speculative pre-response insertion.
    pub async fn create(
        &mut self,
        content: &str,
        course_id: Option<i64>,
        post_type: PostType,
    ) -> Result<Post, ClientError> {
        let post = self.posts.create(content, course_id, post_type).await?;
        self.list.prepend(post.clone());
        Ok(post)
    }

    pub async fn edit(&mut self, post_id: i64, content: &str) -> Result<Post, ClientError> {
        let post = self.posts.update(post_id, content).await?;
        self.list.update(post.clone());
        Ok(post)
    }

    pub async fn delete(&mut self, post_id: i64) -> Result<(), ClientError> {
        self.posts.delete(post_id).await?;
        self.list.remove(post_id);
        Ok(())
    }

    /// Reporting does not change the local list; moderation happens
    /// server-side.
    pub async fn report(&mut self, post_id: i64, reason: &str) -> Result<(), ClientError> {
        self.posts.report(post_id, reason).await
    }

    /// Join the study group attached to a help post; the returned group id
    /// tells the caller which group to open.
    pub async fn join_group(&mut self, post_id: i64) -> Result<JoinGroupResponse, ClientError> {
        self.groups.join_from_post(post_id).await
    }
}
