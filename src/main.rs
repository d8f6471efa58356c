fn main() -> anyhow::Result<()> {
    recipe_query::run()
}
