//! Template sources compiled into the binary.
//!
//! Files live in `templates/` at the crate root. Every [`TemplateId`] must
//! map to one constant here.

use cmakegen_core::domain::{LicenseType, TemplateId};

pub const BUILD_DESCRIPTOR: &str = include_str!("../../templates/CMakeLists.txt.hbs");
pub const TEST_BUILD_DESCRIPTOR: &str = include_str!("../../templates/Test_CMakeLists.txt.hbs");
pub const CI: &str = include_str!("../../templates/ci.yml.hbs");
pub const LICENSE_MIT: &str = include_str!("../../templates/LICENSE-MIT.hbs");
pub const EXTERNAL_FETCH_CONTENT: &str =
    include_str!("../../templates/ExternalFetchContent.cmake.hbs");

/// Template source for `id`.
pub const fn source(id: TemplateId) -> &'static str {
    match id {
        TemplateId::BuildDescriptor => BUILD_DESCRIPTOR,
        TemplateId::TestBuildDescriptor => TEST_BUILD_DESCRIPTOR,
        TemplateId::Ci => CI,
        TemplateId::License(LicenseType::Mit) => LICENSE_MIT,
        TemplateId::ExternalFetchContent => EXTERNAL_FETCH_CONTENT,
    }
}
