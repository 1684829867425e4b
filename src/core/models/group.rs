use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub verified: bool,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>, verified: bool) -> Self {
        Member {
            id: id.into(),
            name: name.into(),
            verified,
        }
    }

    /// Unverified members cannot hold or be offered the admin role.
    pub fn can_become_admin(&self) -> bool {
        self.verified
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub admin_id: String,
    pub members: Vec<Member>,
}

impl Group {
    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn is_member(&self, member_id: &str) -> bool {
        self.member(member_id).is_some()
    }

    pub fn is_admin(&self, member_id: &str) -> bool {
        self.admin_id == member_id
    }
}
