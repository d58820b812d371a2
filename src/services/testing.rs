//! 服务层测试共用的数据

use std::sync::Arc;

use crate::models::courses::{entities::Course, requests::CreateCourseRequest};
use crate::models::questions::{entities::Question, requests::CreateQuestionRequest};
use crate::models::users::{
    entities::{User, UserRole},
    requests::CreateUserRequest,
};
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;

pub(crate) struct Fixture {
    pub storage: Arc<dyn Storage>,
    pub instructor: User,
    pub student: User,
    pub course: Course,
    pub question: Question,
}

/// 一门课程（讲师为所有者）、一名未加入的学生、一道 Python 题目
pub(crate) async fn fixture() -> Fixture {
    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());

    let instructor = storage
        .create_user(CreateUserRequest {
            email: "instructor@example.com".to_string(),
            name: Some("Grace".to_string()),
            role: UserRole::Instructor,
        })
        .await
        .unwrap();
    let student = storage
        .create_user(CreateUserRequest {
            email: "student@example.com".to_string(),
            name: Some("Alan".to_string()),
            role: UserRole::Student,
        })
        .await
        .unwrap();
    let course = storage
        .create_course(CreateCourseRequest {
            code: "COMP1511".to_string(),
            name: "Programming Fundamentals".to_string(),
            description: None,
            owner_id: instructor.id,
        })
        .await
        .unwrap();
    let question = storage
        .create_question(CreateQuestionRequest {
            course_id: course.id,
            title: "FizzBuzz".to_string(),
            description: "Print numbers 1 to 15 replacing multiples of 3 and 5.".to_string(),
            language: "py".to_string(),
        })
        .await
        .unwrap();

    Fixture {
        storage,
        instructor,
        student,
        course,
        question,
    }
}
