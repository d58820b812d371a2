use std::sync::Arc;

use crate::models::{
    courses::{
        entities::{Course, CourseMember, CourseMemberRole},
        requests::CreateCourseRequest,
    },
    questions::{entities::Question, requests::CreateQuestionRequest},
    submissions::{entities::Submission, requests::CreateSubmissionRequest},
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息（不区分大小写）
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 获取用户在课程中的成员信息
    async fn get_course_member(&self, course_id: i64, user_id: i64)
    -> Result<Option<CourseMember>>;
    // 添加课程成员
    async fn add_course_member(
        &self,
        course_id: i64,
        user_id: i64,
        role: CourseMemberRole,
    ) -> Result<CourseMember>;

    /// 题目管理方法
    // 创建题目
    async fn create_question(&self, question: CreateQuestionRequest) -> Result<Question>;
    // 通过ID获取题目
    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>>;

    /// 提交管理方法
    // 创建提交
    async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 列出用户在某题目下的提交（最新在前）
    async fn list_user_submissions(
        &self,
        question_id: i64,
        user_id: i64,
    ) -> Result<Vec<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
