use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::models::courses::entities::{Course, CourseMemberRole};
use crate::models::courses::requests::AddToCourseRequest;
use crate::models::courses::responses::AddMembersResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::{normalize_email_list, validate_email};

pub async fn add_to_course(
    service: &CourseService,
    request: &HttpRequest,
    req: AddToCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let course = match storage.get_course_by_id(req.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            error!("Error loading course {}: {}", req.course_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::CourseMembershipUpdateFailed,
                    "Failed to load course",
                )),
            );
        }
    };

    match can_manage_course(storage.as_ref(), &course, &req.requestor_email).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::PermissionDenied,
                "Only course instructors can add members",
            )));
        }
        Err(e) => {
            error!("Error checking permissions for {}: {}", req.requestor_email, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::CourseMembershipUpdateFailed,
                    "Failed to check permissions",
                )),
            );
        }
    }

    let mut result = AddMembersResponse::default();
    for email in normalize_email_list(&req.emails_to_add) {
        if validate_email(&email).is_err() {
            result.invalid.push(email);
            continue;
        }

        let user = match storage.get_user_by_email(&email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                result.not_found.push(email);
                continue;
            }
            Err(e) => return Ok(membership_failed(&email, e)),
        };

        match storage.get_course_member(course.id, user.id).await {
            Ok(Some(_)) => result.already_members.push(email),
            Ok(None) => match storage
                .add_course_member(course.id, user.id, CourseMemberRole::Student)
                .await
            {
                Ok(_) => result.added.push(email),
                Err(e) => return Ok(membership_failed(&email, e)),
            },
            Err(e) => return Ok(membership_failed(&email, e)),
        }
    }

    info!(
        "Course {}: {} added, {} already members, {} not found, {} invalid",
        course.code,
        result.added.len(),
        result.already_members.len(),
        result.not_found.len(),
        result.invalid.len()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Members processed")))
}

/// 课程所有者、课程讲师或管理员可以管理成员
async fn can_manage_course(
    storage: &dyn Storage,
    course: &Course,
    requestor_email: &str,
) -> crate::errors::Result<bool> {
    let Some(requestor) = storage.get_user_by_email(requestor_email.trim()).await? else {
        return Ok(false);
    };
    if requestor.role.is_admin() || requestor.id == course.owner_id {
        return Ok(true);
    }
    let member = storage.get_course_member(course.id, requestor.id).await?;
    Ok(matches!(member, Some(m) if m.role == CourseMemberRole::Instructor))
}

fn membership_failed(email: &str, e: crate::errors::CodelabError) -> HttpResponse {
    error!("Error adding {} to course: {}", email, e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::CourseMembershipUpdateFailed,
        "Failed to update course membership",
    ))
}
