//! In-memory license graphs shared by the integration tests

use super::mocks::MockMetadataReader;

pub const APEX: &str = "highest.apex.meta_lic";
pub const BIN1: &str = "bin1.meta_lic";
pub const BIN2: &str = "bin2.meta_lic";
pub const LIBA: &str = "liba.so.meta_lic";
pub const LIBB: &str = "libb.so.meta_lic";
pub const LIBC: &str = "libc.a.meta_lic";

/// A container holding two binaries:
///
/// - `bin1` statically links `liba.so` (restricted_if_statically_linked)
///   and `libc.a` (reciprocal, restricted_if_statically_linked)
/// - `bin2` dynamically links `libb.so` (restricted)
pub fn highest_apex() -> MockMetadataReader {
    MockMetadataReader::new()
        .with_file(
            APEX,
            r#"
license_conditions = ["notice"]
license_texts = ["licenses/NOTICE"]
is_container = true
installed = ["/system/apex/highest.apex"]
[[install_map]]
from_path = "out/"
container_path = "bin/"
[[deps]]
file = "bin1.meta_lic"
annotations = ["containment"]
[[deps]]
file = "bin2.meta_lic"
annotations = ["containment"]
"#,
        )
        .with_file(
            BIN1,
            r#"
license_conditions = ["notice"]
license_texts = ["licenses/NOTICE"]
projects = ["device/bin1"]
built = ["out/bin1"]
[[deps]]
file = "liba.so.meta_lic"
annotations = ["static"]
[[deps]]
file = "libc.a.meta_lic"
annotations = ["static"]
"#,
        )
        .with_file(
            BIN2,
            r#"
license_conditions = ["notice"]
license_texts = ["licenses/NOTICE"]
projects = ["device/bin2"]
built = ["out/bin2"]
[[deps]]
file = "libb.so.meta_lic"
annotations = ["dynamic"]
"#,
        )
        .with_file(
            LIBA,
            r#"
license_conditions = ["restricted_if_statically_linked"]
license_texts = ["licenses/LGPL"]
projects = ["external/liba"]
"#,
        )
        .with_file(
            LIBB,
            r#"
license_conditions = ["restricted"]
license_texts = ["licenses/GPL"]
projects = ["external/libb"]
"#,
        )
        .with_file(
            LIBC,
            r#"
license_conditions = ["reciprocal", "restricted_if_statically_linked"]
license_texts = ["licenses/MPL"]
projects = ["external/libc"]
"#,
        )
}

/// Adds a proprietary binary statically linking the restricted `libb.so`.
pub fn with_proprietary_bin(reader: MockMetadataReader) -> MockMetadataReader {
    reader.with_file(
        "bin3.meta_lic",
        r#"
license_conditions = ["proprietary"]
license_texts = ["licenses/PROPRIETARY"]
installed = ["/system/bin/bin3"]
[[deps]]
file = "libb.so.meta_lic"
annotations = ["static"]
"#,
    )
}
