use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::sync::Arc;
use tokio::net::TcpListener;

mod api;
mod config;
mod error;
mod handler;
mod http;
mod logger;
mod page;
mod render;
mod route;
mod search;
mod videos;

use config::AppState;
use search::SearchIndex;
use videos::VideoSource;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;

    let renderer = render::Renderer::from_file(&cfg.template_path(), cfg.app.dev_mode)?;
    let index = search::FileIndex::load(&cfg.app.data_dir)?;
    let videos = videos::DataDirVideos::new(&cfg.app.data_dir);

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(AppState {
        config: cfg,
        index,
        videos,
        renderer,
    });

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local.run_until(accept_loop(listener, state)).await
}

async fn accept_loop<S: SearchIndex, V: VideoSource>(
    listener: TcpListener,
    state: Arc<AppState<S, V>>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, _peer_addr)) => handle_connection(stream, Arc::clone(&state)),
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}

/// Serve one connection in a spawned task. Requests are independent; the
/// shared state is read-only.
fn handle_connection<S: SearchIndex, V: VideoSource>(
    stream: tokio::net::TcpStream,
    state: Arc<AppState<S, V>>,
) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, state).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}

/// Create a `TcpListener` with SO_REUSEPORT and SO_REUSEADDR enabled, so
/// a redeploy can bind before the old process fully releases the port.
fn create_reusable_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
