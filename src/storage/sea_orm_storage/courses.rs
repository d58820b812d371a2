//! 课程与课程成员存储操作

use super::SeaOrmStorage;
use crate::entity::course_members::{
    ActiveModel as CourseMemberActiveModel, Column as CourseMemberColumn,
    Entity as CourseMembers,
};
use crate::entity::courses::{ActiveModel, Entity as Courses};
use crate::errors::{CodelabError, Result};
use crate::models::courses::{
    entities::{Course, CourseMember, CourseMemberRole},
    requests::CreateCourseRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建课程，创建者自动成为课程教师
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();
        let owner_id = req.owner_id;

        let model = ActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            description: Set(req.description),
            owner_id: Set(owner_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodelabError::database_operation(format!("创建课程失败: {e}")))?;

        self.add_course_member_impl(result.id, owner_id, CourseMemberRole::Instructor)
            .await?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| CodelabError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 获取用户在课程中的成员信息
    pub async fn get_course_member_impl(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<CourseMember>> {
        let result = CourseMembers::find()
            .filter(
                Condition::all()
                    .add(CourseMemberColumn::CourseId.eq(course_id))
                    .add(CourseMemberColumn::UserId.eq(user_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CodelabError::database_operation(format!("查询课程成员失败: {e}")))?;

        Ok(result.map(|m| m.into_course_member()))
    }

    /// 添加课程成员
    pub async fn add_course_member_impl(
        &self,
        course_id: i64,
        user_id: i64,
        role: CourseMemberRole,
    ) -> Result<CourseMember> {
        let now = chrono::Utc::now().timestamp();

        let model = CourseMemberActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            role: Set(role.to_string()),
            joined_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodelabError::database_operation(format!("添加课程成员失败: {e}")))?;

        Ok(result.into_course_member())
    }
}
