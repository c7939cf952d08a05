use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{
    ArchiveClassRequest, ClassQueryParams, CreateClassRequest, UpdateClassRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ClassService;
use crate::utils::SafeClassIdI64;

// 懒加载的全局 ClassService 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassQueryParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn get_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, class_id.0, update_data.into_inner())
        .await
}

pub async fn archive_class(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    archive_data: web::Json<ArchiveClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .archive_class(&req, class_id.0, archive_data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                // 按角色列出自己拥有/加入的班级
                web::resource("").route(web::get().to(list_classes)).route(
                    web::post()
                        .to(create_class)
                        // 仅教师可以创建班级
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::instructor_roles(),
                        )),
                ),
            )
            .service(
                // 学员通过加入码加入班级，加入码枚举受限流保护
                web::resource("/join")
                    .wrap(middlewares::RateLimit::join_code())
                    .route(
                        web::post()
                            .to(super::enrollments::join_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::learner_roles())),
                    ),
            )
            .service(
                web::resource("/{class_id}")
                    // 拥有者或已加入的学员可以查看详情
                    .route(web::get().to(get_class))
                    .route(
                        web::put()
                            .to(update_class)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::instructor_roles(),
                            )),
                    )
                    .route(
                        web::delete()
                            .to(delete_class)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::instructor_roles(),
                            )),
                    ),
            )
            .service(
                web::resource("/{class_id}/archive").route(
                    web::put()
                        .to(archive_class)
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::instructor_roles(),
                        )),
                ),
            )
            .service(
                web::resource("/{class_id}/leave").route(
                    web::post()
                        .to(super::enrollments::leave_class)
                        .wrap(middlewares::RequireRole::new_any(UserRole::learner_roles())),
                ),
            ),
    );
}
