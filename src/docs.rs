use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::middleware::auth::ACCESS_TOKEN_HEADER;
use escola_core::{ErrorMessage, ErrorResponse};
use escola_models::admins::AdminListData;
use escola_models::classes::{ClassCreatedData, ClassListData, ClassUpdatedData};
use escola_models::people::{StudentListData, TeacherListData};
use escola_models::{
    Admin, AdminCredentialsDto, AdminListResponse, AdminResponse, Class, ClassCreatedResponse,
    ClassDto, ClassListResponse, ClassUpdatedResponse, CreatePersonDto, DeleteRecordDto,
    EchoIdResponse, EnrollStudentDto, Enrollment, EnrollmentResponse, LoginRequest, LoginResponse,
    MessageResponse, Person, PersonListResponse, PersonProfileDto, PersonResponse, ReportCard,
    StudentListResponse, StudentWithClass, UpdateAdminDto, UpdateClassDto, UpdatePersonDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::students::controller::create_student_page,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::student_id_from_url,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::teachers::controller::create_teacher_page,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::list_teachers,
        crate::modules::teachers::controller::teacher_id_from_url,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::admins::controller::create_admin_page,
        crate::modules::admins::controller::create_admin,
        crate::modules::admins::controller::list_admins,
        crate::modules::admins::controller::admin_id_from_url,
        crate::modules::admins::controller::update_admin,
        crate::modules::admins::controller::delete_admin,
        crate::modules::classes::controller::create_class_page,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::list_classes,
        crate::modules::classes::controller::class_id_from_url,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::enrollments::controller::enroll_student_page,
        crate::modules::enrollments::controller::enroll_student,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorMessage,
            MessageResponse,
            EchoIdResponse,
            DeleteRecordDto,
            LoginRequest,
            LoginResponse,
            Person,
            PersonProfileDto,
            CreatePersonDto,
            UpdatePersonDto,
            PersonResponse,
            PersonListResponse,
            TeacherListData,
            StudentWithClass,
            StudentListData,
            StudentListResponse,
            Admin,
            AdminCredentialsDto,
            UpdateAdminDto,
            AdminResponse,
            AdminListData,
            AdminListResponse,
            Class,
            ClassDto,
            UpdateClassDto,
            ClassCreatedData,
            ClassCreatedResponse,
            ClassUpdatedData,
            ClassUpdatedResponse,
            ClassListData,
            ClassListResponse,
            Enrollment,
            ReportCard,
            EnrollStudentDto,
            EnrollmentResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Administrator login"),
        (name = "Students", description = "Student records"),
        (name = "Teachers", description = "Teacher records"),
        (name = "Admins", description = "Administrator accounts, permission level 2 only"),
        (name = "Classes", description = "Classes and their teacher"),
        (name = "Enrollments", description = "Placing students in classes")
    ),
    info(
        title = "Escola API",
        version = "0.1.0",
        description = "School administration API: students, teachers, administrators, classes and enrollments.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "access_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(ACCESS_TOKEN_HEADER))),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes_and_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/inserirAluno"));
        assert!(doc.paths.paths.contains_key("/editarDadosTurma/{id}"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("access_token"));
    }
}
