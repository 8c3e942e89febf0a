pub mod organization {
    use serde::{Deserialize, Serialize};

    use crate::domain::{datatype::ActivityStatus, entity::Ident};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct User {
        #[serde(default)]
        pub id: Option<Ident>,
        pub first_name: String,
        pub last_name: String,
        pub user_name: String,
        /// Accepted on creation, never written back.
        #[serde(default, skip_serializing)]
        pub password: Option<String>,
        pub user_number: String,
        #[serde(default)]
        pub status: ActivityStatus,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Team {
        #[serde(default)]
        pub id: Option<Ident>,
        pub name: String,
        #[serde(default)]
        pub status: ActivityStatus,
    }
}

pub mod tracking {
    use serde::{Deserialize, Serialize};

    use crate::domain::{datatype::WorkItemStatus, entity::Ident};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WorkItem {
        #[serde(default)]
        pub id: Option<Ident>,
        pub title: String,
        pub description: String,
        #[serde(default)]
        pub status: WorkItemStatus,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Issue {
        #[serde(default)]
        pub id: Option<Ident>,
        pub title: String,
        pub reason: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub answer: Option<String>,
    }
}
