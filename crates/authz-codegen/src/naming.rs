//! Identifier case conversion, exposed to templates as filters.
//!
//! Namespace separators in prefixed type names (`acme/user`) act as word
//! boundaries, so `acme/user` becomes `AcmeUser`.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

pub fn pascal_case(name: &str) -> String {
    name.to_upper_camel_case()
}

pub fn camel_case(name: &str) -> String {
    name.to_lower_camel_case()
}

pub fn snake_case(name: &str) -> String {
    name.to_snake_case()
}

pub fn kebab_case(name: &str) -> String {
    name.to_kebab_case()
}

pub fn screaming_snake_case(name: &str) -> String {
    name.to_shouty_snake_case()
}

/// Register every case filter on `env`.
pub(crate) fn register_filters(env: &mut minijinja::Environment<'_>) {
    env.add_filter("pascal_case", pascal_case);
    env.add_filter("camel_case", camel_case);
    env.add_filter("snake_case", snake_case);
    env.add_filter("kebab_case", kebab_case);
    env.add_filter("screaming_snake_case", screaming_snake_case);
}
