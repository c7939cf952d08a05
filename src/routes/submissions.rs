use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{GradeSubmissionRequest, SubmitAssignmentRequest};
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::{SafeAssignmentIdI64, SafeClassIdI64, SafeLearnerIdI64};

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// HTTP处理程序
pub async fn submit(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    assignment_id: SafeAssignmentIdI64,
    submit_data: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit(&req, class_id.0, assignment_id.0, submit_data.into_inner())
        .await
}

pub async fn withdraw(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .withdraw(&req, class_id.0, assignment_id.0)
        .await
}

pub async fn get_own_submission(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_own_submission(&req, class_id.0, assignment_id.0)
        .await
}

pub async fn grade(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    assignment_id: SafeAssignmentIdI64,
    learner_id: SafeLearnerIdI64,
    grade_data: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade(
            &req,
            class_id.0,
            assignment_id.0,
            learner_id.0,
            grade_data.into_inner(),
        )
        .await
}

pub async fn list_submissions(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, class_id.0, assignment_id.0)
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/assignments/{assignment_id}/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        // 拥有者查看全部提交
                        web::get()
                            .to(list_submissions)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::instructor_roles(),
                            )),
                    )
                    .route(
                        // 学员提交/重交
                        web::post()
                            .to(submit)
                            .wrap(middlewares::RequireRole::new_any(UserRole::learner_roles())),
                    ),
            )
            .service(
                web::resource("/my")
                    .route(
                        web::get()
                            .to(get_own_submission)
                            .wrap(middlewares::RequireRole::new_any(UserRole::learner_roles())),
                    )
                    .route(
                        web::delete()
                            .to(withdraw)
                            .wrap(middlewares::RequireRole::new_any(UserRole::learner_roles())),
                    ),
            )
            .service(
                web::resource("/{learner_id}/grade").route(
                    web::put()
                        .to(grade)
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::instructor_roles(),
                        )),
                ),
            ),
    );
}
