//! Sample Bazaar application: a seller shop that reports average order
//! prices over an endpoint, packages variants on a nightly schedule, and
//! serves a small slot-picker widget.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing::info;

use bazaar_capabilities::{KvStore, SellerApi};
use bazaar_core::{EventKind, ExecContext};
use bazaar_registry::{EndpointResponse, HandlerRegistry, ParamSpec, ScheduleOptions};
use bazaar_runtime::{Dispatcher, Scheduler};
use bazaar_telemetry::{LogConfig, setup_logging};
use bazaar_widgets::{Label, SelectBox, SubmitButton, TimePicker};

#[derive(Debug, Parser)]
#[command(name = "seller-report", about = "Run the sample seller app")]
struct Args {
    /// Seller API credential.
    #[arg(long, env = "SELLER_API_KEY", default_value = "sk-demo")]
    api_key: String,

    /// Backing file for the app's key-value store.
    #[arg(long, env = "KV_STORE_PATH", default_value = "seller-report.json")]
    store_path: String,

    /// Log level filter.
    #[arg(long, default_value = "info")]
    log: String,
}

fn register_handlers(registry: &mut HandlerRegistry) -> Result<()> {
    registry.endpoint(
        "average_order_price",
        Some("/average-order-price"),
        vec![ParamSpec::named("seller_api")],
        |_payload, caps| async move {
            let api = caps.get::<SellerApi>("seller_api")?;
            let orders = api.orders("2024-01-01", "2024-12-31");
            let total: u64 = orders.iter().map(|o| o.total_price).sum();
            let average = total / orders.len().max(1) as u64;
            Ok(EndpointResponse::ok(json!({ "average_price": average })))
        },
    )?;

    registry.schedule(
        "package_pending_variants",
        "0 9 * * *",
        ScheduleOptions::default(),
        vec![
            ParamSpec::named("seller_api"),
            ParamSpec::named("kv_store"),
        ],
        |caps| async move {
            let api = caps.get::<SellerApi>("seller_api")?;
            let store = caps.get::<KvStore>("kv_store")?;

            let variants = api.should_package_variants("2024-01-01", "2024-01-02");
            let slots = api.warehouse_capacity(1);
            let receipt = api.create_package(&variants, 1, slots[0].id);

            store.set("last_package_ok", json!(receipt.success))?;
            Ok(())
        },
    )?;

    registry.widget(
        "pickup_slot_picker",
        "pickup-slots",
        vec![ParamSpec::named("seller_api")],
        |mut builder, caps| {
            let api = caps.get::<SellerApi>("seller_api")?;
            let slots = api.warehouse_capacity(1);

            builder.add(Label::new("Choose a pickup slot"));
            builder.add(SelectBox::new(
                slots.iter().map(|s| format!("{}-{}", s.from, s.to)),
            ));
            builder.add(TimePicker::new(""));
            builder.add(SubmitButton::new("Reserve"));
            Ok(builder)
        },
    )?;

    registry.on_event("log_gold_price", EventKind::GoldPrice, |payload| {
        info!(%payload, "Gold price update received");
        Ok(())
    });

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&LogConfig::new(&args.log))?;

    let ctx = Arc::new(
        ExecContext::builder()
            .seller_api_key(args.api_key)
            .kv_store_path(args.store_path)
            .build(),
    );

    // Declaration phase: register everything, then seal.
    let mut registry = HandlerRegistry::with_builtin_catalog();
    register_handlers(&mut registry)?;
    let sealed = Arc::new(registry.seal());

    // Show the endpoint and widget paths once before the loop takes over.
    let dispatcher = Dispatcher::new(Arc::clone(&sealed));
    let response = dispatcher
        .call_endpoint("/average-order-price", json!({}), Some(ctx.as_ref()))
        .await?;
    info!(status = response.status, body = %response.body, "Endpoint response");

    let markup = dispatcher.render_widget("pickup-slots", Some(ctx.as_ref()))?;
    info!(%markup, "Widget markup");

    dispatcher.emit_event(EventKind::GoldPrice, &json!({ "price": 2034.5 }))?;

    // Dispatch phase: the scheduler polls until the process is killed.
    Scheduler::new(sealed, ctx).run().await;
    Ok(())
}
