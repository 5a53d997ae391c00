//! Two blocking runners under the default signal-triggered controller.
//!
//! Run with `cargo run --example graceful`, then press Ctrl-C (or send
//! SIGTERM) to watch the ordered teardown.

use tokio_util::sync::CancellationToken;

use bootvisor::{Bootstrap, RunError, RunnerFn, RunnerRef};

fn worker(name: &'static str) -> RunnerRef {
    let halt = CancellationToken::new();
    let stop_halt = halt.clone();
    RunnerFn::arc(
        name,
        move |ctx: CancellationToken| {
            let halt = halt.clone();
            async move {
                println!("[{name}] up");
                tokio::select! {
                    _ = ctx.cancelled() => {}
                    _ = halt.cancelled() => {}
                }
                println!("[{name}] down");
                Ok::<(), RunError>(())
            }
        },
        move |_ctx: CancellationToken| {
            let halt = stop_halt.clone();
            async move {
                halt.cancel();
                Ok::<(), RunError>(())
            }
        },
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let boot = Bootstrap::builder()
        .runners([worker("api"), worker("metrics")])
        .on_run(|_ctx| async {
            println!("all runners started; press Ctrl-C to stop");
            Ok::<(), RunError>(())
        })
        .build();

    boot.run(CancellationToken::new()).await?;
    println!("bye");
    Ok(())
}
