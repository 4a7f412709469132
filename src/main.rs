use apiburst::error::AppResult;

fn main() -> AppResult<()> {
    apiburst::entry::run()
}
