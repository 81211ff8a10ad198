use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = zettel::Args::parse();
	zettel::run(args).await
}
