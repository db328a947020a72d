use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = hevra_api::Args::parse();

	hevra_api::run(args).await
}
