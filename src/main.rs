use loadlite::entry;
use loadlite::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
