fn main() -> anyhow::Result<()> {
	cloud_js_converter::cli::run()
}
