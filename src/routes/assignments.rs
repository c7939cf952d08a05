use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateDueDateRequest};
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;
use crate::utils::{SafeAssignmentIdI64, SafeClassIdI64};

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// HTTP处理程序
pub async fn create_assignment(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, class_id.0, assignment_data.into_inner())
        .await
}

pub async fn list_assignments(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_assignments(&req, class_id.0).await
}

pub async fn update_due_date(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    assignment_id: SafeAssignmentIdI64,
    update_data: web::Json<UpdateDueDateRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_due_date(&req, class_id.0, assignment_id.0, update_data.into_inner())
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(&req, class_id.0, assignment_id.0)
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                // 班级内成员均可查看作业列表
                web::resource("")
                    .route(web::get().to(list_assignments))
                    .route(
                        web::post()
                            .to(create_assignment)
                            // 仅拥有者可以布置作业
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::instructor_roles(),
                            )),
                    ),
            )
            .service(
                web::resource("/{assignment_id}/due-date").route(
                    web::put()
                        .to(update_due_date)
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::instructor_roles(),
                        )),
                ),
            )
            .service(
                web::resource("/{assignment_id}").route(
                    web::delete()
                        .to(delete_assignment)
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::instructor_roles(),
                        )),
                ),
            ),
    );
}
