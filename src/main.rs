fn main() -> anyhow::Result<()> {
    mentillo_lib::run()
}
