use super::Host;
use super::common::CommonArgs;
use crate::Result;
use crate::eval::RuleEvaluator;
use crate::server::{AppState, build_router, serve};
use clap::Parser;
use core::net::SocketAddr;
use ohno::IntoAppError;
use std::io::Write;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on [default: from configuration]
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<SocketAddr>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn serve_requests<H: Host>(host: &mut H, args: &ServeArgs) -> Result<()> {
    let config = args.common.setup(host)?;
    let addr = args.listen.unwrap_or(config.server.listen);

    let listener = TcpListener::bind(addr).await.into_app_err_with(|| format!("binding to {addr}"))?;
    let local_addr = listener.local_addr().into_app_err("reading listener address")?;
    let _ = writeln!(
        host.output(),
        "Serving {} rules ({} requests) on http://{local_addr}",
        config.dialect,
        config.context_schema
    );

    let state = Arc::new(AppState::new(RuleEvaluator::new(config.dialect), config.context_schema));
    serve(listener, build_router(state, config.server.max_body_bytes)).await
}
