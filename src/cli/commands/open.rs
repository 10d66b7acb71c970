//! open: show the served site in a browser.

use super::server::serve_detached;
use crate::cli::Context;
use crate::cli::ports::has_listener;
use crate::cli::prompt::confirm;
use crate::error::Result;

/// Opens the site URL, offering to start the background server first.
pub async fn open(ctx: &Context) -> Result<()> {
    let url = ctx.config.site_url();

    if !has_listener(ctx.config.jekyll_port).await {
        ctx.runtime
            .warn(&format!("Nothing is listening on {}", url))?;
        if confirm("Start the server in the background now?", &ctx.runtime).await? {
            serve_detached(ctx).await?;
        }
    }

    let Some((program, mut args)) = opener_for(std::env::consts::OS)
        .filter(|(program, _)| which::which(program).is_ok())
    else {
        ctx.runtime.println(&format!("Open {} in your browser", url))?;
        return Ok(());
    };

    args.push(url.clone());
    if let Err(e) = ctx.runner().run(program, &args, None, true).await {
        log::warn!("Opening browser failed: {}", e);
        ctx.runtime.println(&format!("Open {} in your browser", url))?;
    }
    Ok(())
}

/// URL opener program and leading arguments for a target OS.
fn opener_for(os: &str) -> Option<(&'static str, Vec<String>)> {
    match os {
        "macos" => Some(("open", Vec::new())),
        "windows" => Some((
            "cmd",
            vec!["/C".to_string(), "start".to_string(), String::new()],
        )),
        "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Some(("xdg-open", Vec::new())),
        _ => None,
    }
}
