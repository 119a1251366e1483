use gpui::{
    App, AppContext, Application, Bounds, TitlebarOptions, WindowBounds, WindowOptions, px, size,
};
use techform::page::SignupPage;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

const WINDOW_TITLE: &str = "Cadastro";
const WINDOW_WIDTH: f32 = 480.0;
const WINDOW_HEIGHT: f32 = 820.0;
const DEFAULT_LOG_FILTER: &str = "techform=info";

fn main() {
    init_tracing();

    Application::new().run(|cx: &mut App| {
        let bounds = Bounds::centered(None, size(px(WINDOW_WIDTH), px(WINDOW_HEIGHT)), cx);
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            titlebar: Some(TitlebarOptions {
                title: Some(WINDOW_TITLE.into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        if let Err(error) =
            cx.open_window(options, |window, cx| cx.new(|cx| SignupPage::new(window, cx)))
        {
            tracing::error!(%error, "failed to open signup window");
            cx.quit();
            return;
        }
        tracing::info!("signup window opened");
        cx.activate(true);
    });
}

/// `RUST_LOG` wins; otherwise only this crate logs, at info.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}
