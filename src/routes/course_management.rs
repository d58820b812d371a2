use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::courses::requests::AddToCourseRequest;
use crate::services::CourseService;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// 批量邀请学生
pub async fn add_to_course(
    request: HttpRequest,
    body: web::Json<AddToCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .add_to_course(&request, body.into_inner())
        .await
}

pub fn configure_course_management_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/course-management")
            .route("/add-to-course", web::post().to(add_to_course)),
    );
}
