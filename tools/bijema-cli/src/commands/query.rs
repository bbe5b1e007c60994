//! Query codec commands.

use anyhow::{bail, Result};
use bijema_commerce::query::{self, FilterPatch, FilterState, FilterValue};

use super::{QueryArgs, QueryCommand};
use crate::context::Context;

/// Run the query command.
pub async fn run(args: QueryArgs, ctx: &Context) -> Result<()> {
    match args.command {
        QueryCommand::Parse { query } => parse_query(&query, ctx),
        QueryCommand::Toggle { query, key, value } => {
            let current = FilterState::parse(&query);
            print_query(&query::toggle_filter(&current, &key, &value), ctx);
            Ok(())
        }
        QueryCommand::Remove { query, key, value } => {
            let current = FilterState::parse(&query);
            print_query(&query::remove_filter(&current, &key, value.as_deref()), ctx);
            Ok(())
        }
        QueryCommand::Set { query, params } => {
            let patch = parse_patch(&params)?;
            print_query(&query::update_query(&FilterState::parse(&query), &patch), ctx);
            Ok(())
        }
        QueryCommand::Clear { query } => {
            print_query(&query::clear_all_filters(&FilterState::parse(&query)), ctx);
            Ok(())
        }
    }
}

fn parse_query(raw: &str, ctx: &Context) -> Result<()> {
    let state = FilterState::parse(raw);

    if ctx.output.is_json() {
        ctx.output.json(&state);
        return Ok(());
    }

    if state.is_empty() {
        ctx.output.info("No filters");
        return Ok(());
    }

    ctx.output.header("Filters");
    for (key, value) in state.iter() {
        let shown = match value {
            FilterValue::Scalar(v) => v.clone(),
            FilterValue::Multi(values) => format!("[{}]", values.join(", ")),
        };
        ctx.output.kv(key, &shown);
    }
    ctx.output.kv("sort", state.sort().display_name());

    Ok(())
}

fn print_query(next: &str, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "query": next }));
    } else {
        ctx.output.plain(next);
    }
}

/// Build a patch from `key=value` arguments; an empty value deletes the key.
fn parse_patch(params: &[String]) -> Result<FilterPatch> {
    let mut patch = FilterPatch::new();
    for param in params {
        let Some((key, value)) = param.split_once('=') else {
            bail!("Expected key=value, got `{}`", param);
        };
        if key.is_empty() {
            bail!("Missing key in `{}`", param);
        }
        let value = (!value.is_empty()).then(|| FilterValue::from(value));
        patch.insert(key, value);
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_patch() {
        let patch = parse_patch(&["price_min=200".to_string(), "sort=".to_string()]).unwrap();
        let current = FilterState::parse("sort=newest&category=Bath");
        assert_eq!(
            query::update_query(&current, &patch),
            "category=Bath&price_min=200"
        );
    }

    #[test]
    fn test_parse_patch_rejects_bare_words() {
        assert!(parse_patch(&["category".to_string()]).is_err());
        assert!(parse_patch(&["=Kitchen".to_string()]).is_err());
    }
}
