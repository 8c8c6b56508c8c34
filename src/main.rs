mod app;
mod social;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "networks/loquitas.json")]
    network_path: String,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "socnet-3d",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::SocnetApp::new(
                cc,
                args.network_path.clone(),
            )))
        }),
    )
}
