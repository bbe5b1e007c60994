//! Route guard command.

use anyhow::Result;
use bijema_commerce::access::RouteDecision;

use super::GuardArgs;
use crate::context::Context;

/// Run the guard command.
pub async fn run(args: GuardArgs, ctx: &Context) -> Result<()> {
    let decision = ctx.config.access.check(&args.path, args.signed_in);

    if ctx.output.is_json() {
        ctx.output.json(&decision);
        return Ok(());
    }

    match decision {
        RouteDecision::Proceed => ctx.output.success(&format!("{} proceeds", args.path)),
        RouteDecision::Redirect(location) => ctx
            .output
            .warn(&format!("{} redirects to {}", args.path, location)),
    }

    Ok(())
}
