use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::JoinClassRequest;
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;
use crate::utils::{SafeClassIdI64, SafeLearnerIdI64};

// 懒加载的全局 EnrollmentService 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// HTTP处理程序
pub async fn join_class(
    req: HttpRequest,
    join_data: web::Json<JoinClassRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .join_class(&req, join_data.into_inner())
        .await
}

pub async fn leave_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.leave_class(&req, class_id.0).await
}

pub async fn list_members(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.list_members(&req, class_id.0).await
}

pub async fn remove_member(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    learner_id: SafeLearnerIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .remove_member(&req, class_id.0, learner_id.0)
        .await
}

// 配置路由（join/leave 挂在班级路由下）
pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/members")
            .wrap(middlewares::RequireRole::new_any(
                UserRole::instructor_roles(),
            ))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_members))
            .route("/{learner_id}", web::delete().to(remove_member)),
    );
}
