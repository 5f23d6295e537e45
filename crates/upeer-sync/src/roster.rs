use upeer_client::ClientError;
use upeer_client::services::GroupService;
use upeer_types::models::{Group, GroupMember};

use crate::list::SyncedList;

/// The user's study groups plus the member roster of the currently
/// selected group.
pub struct GroupRoster {
    groups: GroupService,
    list: SyncedList<Group>,
    members: SyncedList<GroupMember>,
    selected: Option<i64>,
}

impl GroupRoster {
    pub fn new(groups: GroupService) -> Self {
        Self {
            groups,
            list: SyncedList::new(),
            members: SyncedList::new(),
            selected: None,
        }
    }

    pub fn groups(&self) -> &SyncedList<Group> {
        &self.list
    }

    pub fn members(&self) -> &SyncedList<GroupMember> {
        &self.members
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let items = self.groups.mine().await?;
        self.list.replace(items);
        Ok(())
    }

    /// Selecting a group is a dependency change: fetch its roster
    /// wholesale.
    pub async fn select(&mut self, group_id: i64) -> Result<(), ClientError> {
        let details = self.groups.details(group_id).await?;
        self.selected = Some(group_id);
        self.members.replace(details.members);
        Ok(())
    }

    pub async fn create(&mut self, title: &str) -> Result<Group, ClientError> {
        let group = self.groups.create(title).await?;
        self.list.prepend(group.clone());
        Ok(group)
    }

    /// Join returns no group payload, so the list is re-fetched to pick up
    /// the authoritative ordering.
    pub async fn join(&mut self, group_id: i64) -> Result<(), ClientError> {
        self.groups.join(group_id).await?;
        self.refresh().await
    }

    pub async fn leave(&mut self, group_id: i64) -> Result<(), ClientError> {
        self.groups.leave(group_id).await?;
        self.list.remove(group_id);
        if self.selected == Some(group_id) {
            self.selected = None;
            self.members.replace(Vec::new());
        }
        Ok(())
    }

    /// Invite by email, then re-fetch the roster of the affected group if
    /// it is the selected one.
    pub async fn invite(&mut self, group_id: i64, email: &str) -> Result<(), ClientError> {
        self.groups.invite(group_id, email).await?;
        if self.selected == Some(group_id) {
            let details = self.groups.details(group_id).await?;
            self.members.replace(details.members);
        }
        Ok(())
    }
}
