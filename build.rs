// build.rs

// Compiles `locales/*.toml` into the `t!` macro included by `src/lib.rs`.
// `t!("key")` expands to a string literal, so it can be used as a `format!` string.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

const BASE_LOCALE: &str = "en";

/// The locale to build: a `lang_*` feature, else `PIZZA_LANG`, else English.
fn selected_locale() -> String {
    let mut from_features: Vec<String> = env::vars()
        .filter_map(|(key, _)| {
            key.strip_prefix("CARGO_FEATURE_LANG_")
                .map(str::to_lowercase)
        })
        .collect();
    from_features.sort();

    match from_features.as_slice() {
        [] => env::var("PIZZA_LANG").unwrap_or_else(|_| BASE_LOCALE.to_string()),
        [only] => only.clone(),
        [first, ..] => {
            println!(
                "cargo:warning=Several lang_* features are enabled ({:?}), building '{}'.",
                from_features, first
            );
            first.clone()
        }
    }
}

fn read_locale(path: &str) -> Option<HashMap<String, String>> {
    let content = fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(strings) => Some(strings),
        Err(e) => panic!("{} is not a valid locale file: {}", path, e),
    }
}

/// Renders the strings as `macro_rules!` arms. Unknown keys become a compile error.
fn render_macro(strings: &HashMap<String, String>) -> String {
    let mut keys: Vec<&String> = strings.keys().collect();
    keys.sort();

    let mut code = String::from(
        "/// Expands to the translated string literal for a key.\n#[macro_export]\nmacro_rules! t {\n",
    );
    for key in keys {
        let literal = strings[key].replace('\\', "\\\\").replace('"', "\\\"");
        code.push_str(&format!("    (\"{}\") => {{ \"{}\" }};\n", key, literal));
    }
    code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"Missing translation key: \", $key)) }};\n",
    );
    code.push('}');
    code
}

fn main() {
    let locale = selected_locale();
    println!("cargo:rustc-env=PIZZA_LANG_EFFECTIVE={}", locale);
    println!("cargo:rerun-if-env-changed=PIZZA_LANG");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=locales/");

    let base_path = format!("locales/{}.toml", BASE_LOCALE);
    let mut strings =
        read_locale(&base_path).unwrap_or_else(|| panic!("{} is required", base_path));

    // Other locales only override the keys they translate.
    if locale != BASE_LOCALE {
        let path = format!("locales/{}.toml", locale);
        match read_locale(&path) {
            Some(translated) => strings.extend(translated),
            None => println!("cargo:warning=No {} found, building English strings.", path),
        }
    }

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    fs::write(Path::new(&out_dir).join("translations.rs"), render_macro(&strings))
        .expect("could not write the generated translations");
}
