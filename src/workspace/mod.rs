//! 题目页面的客户端流程
//!
//! 编辑器页面上的三个操作：请求代码反馈、提交代码、邀请课程成员。
//! 界面相关的部分（提示框、页面跳转）通过 [`Notifier`] 和 [`Navigator`] 注入。

pub mod api;
pub mod membership;
pub mod notice;
pub mod question;

pub use api::{CourseApi, HttpCourseApi};
pub use membership::{InviteOutcome, invite_members, split_emails};
pub use notice::{Navigator, Notice, NoticeVariant, Notifier};
pub use question::{ActionOutcome, QuestionWorkspace};
