use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 课程代码，用于前端路由 /courses/{code}
    pub code: String,
    // 课程名称
    pub name: String,
    // 课程描述
    pub description: Option<String>,
    // 创建者ID
    pub owner_id: i64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课程成员角色
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseMemberRole {
    Student,
    Instructor,
}

impl std::fmt::Display for CourseMemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseMemberRole::Student => write!(f, "student"),
            CourseMemberRole::Instructor => write!(f, "instructor"),
        }
    }
}

impl std::str::FromStr for CourseMemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(CourseMemberRole::Student),
            "instructor" => Ok(CourseMemberRole::Instructor),
            _ => Err(format!("Invalid course member role: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseMember {
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub role: CourseMemberRole,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}
