use js_sys::Array;
use mycomd_convert::{ConvertOptions, ConverterRegistry, Grammar, convert_with_options};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Config
// ============================================================================

/// Reads conversion options from a JS object; `undefined`, `null` and
/// malformed objects fall back to the defaults.
fn parse_config(config: JsValue) -> ConvertOptions {
    if config.is_undefined() || config.is_null() {
        return ConvertOptions::default();
    }
    serde_wasm_bindgen::from_value(config).unwrap_or_default()
}

fn parse_grammar(tag: &str) -> Result<Grammar, JsError> {
    tag.parse::<Grammar>()
        .map_err(|e| JsError::new(&e.to_string()))
}

fn grammar_tag(grammar: Grammar) -> &'static str {
    match grammar {
        Grammar::Mycomarkup => "mycomarkup",
        Grammar::Markdown => "markdown",
    }
}

// ============================================================================
// Convert API
// ============================================================================

/// Convert `content` from one grammar to another.
///
/// `from` and `to` accept `markdown`/`md` and `mycomarkup`/`myco`. Returns
/// `{ text, warnings }`.
#[wasm_bindgen]
pub fn convert(content: &str, from: &str, to: &str, config: JsValue) -> Result<JsValue, JsError> {
    let from = parse_grammar(from)?;
    let to = parse_grammar(to)?;
    let options = parse_config(config);

    let conversion = convert_with_options(content, from, to, &options)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&conversion)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Grammar tag (`markdown` or `mycomarkup`) of a file, judged by its extension.
#[wasm_bindgen(js_name = detectGrammar)]
pub fn detect_grammar(path: &str) -> String {
    grammar_tag(Grammar::detect(path)).to_string()
}

/// `path` with its extension replaced by the one used for grammar `to`.
#[wasm_bindgen(js_name = convertedPath)]
pub fn converted_path(path: &str, to: &str) -> Result<String, JsError> {
    let to = parse_grammar(to)?;
    Ok(to.replace_extension(path).to_string_lossy().into_owned())
}

/// Registered conversions as `[from, to]` tag pairs.
#[wasm_bindgen(js_name = supportedPairs)]
pub fn supported_pairs() -> Array {
    ConverterRegistry::with_defaults()
        .pairs()
        .into_iter()
        .map(|(from, to)| {
            let pair = Array::new();
            pair.push(&JsValue::from_str(grammar_tag(from)));
            pair.push(&JsValue::from_str(grammar_tag(to)));
            JsValue::from(pair)
        })
        .collect()
}
