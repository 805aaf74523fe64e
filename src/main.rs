fn main() -> anyhow::Result<()> {
    title_annotator_lib::run()
}
