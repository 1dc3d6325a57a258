//! Line-oriented front end for the users API.

use roster::{
    client::{FormField, HttpUsersApi, UserDirectory},
    configuration::get_configuration,
    telementry::{get_subscriber, init_subscriber},
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

const HELP: &str = "\
commands:
  list                      reload and show users
  set <name|email|role> <v> change a form field
  edit <id>                 load a user into the form
  save                      create or update from the form
  cancel                    leave edit mode and clear the form
  rm <id>                   delete a user (asks first)
  quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration()?;
    let subscriber = get_subscriber("roster-console".into(), "warn".into(), None, std::io::stderr)?;
    init_subscriber(subscriber)?;

    let api = HttpUsersApi::new(configuration.client.api_base_url);
    let mut directory = UserDirectory::mount(api).await;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", directory.state());
    println!("{HELP}");
    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("list"), _) => directory.load().await,
            (Some("set"), Some(field)) => match field.parse::<FormField>() {
                Ok(field) => directory.update_field(field, words.collect::<Vec<_>>().join(" ")),
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            },
            (Some("edit"), Some(id)) => {
                if !id.parse().is_ok_and(|id| directory.edit(id)) {
                    println!("no listed user with id {id}");
                    continue;
                }
            }
            (Some("save"), _) => directory.submit().await,
            (Some("cancel"), _) => directory.reset(),
            (Some("rm"), Some(id)) => {
                let Ok(id) = id.parse() else {
                    println!("invalid id {id}");
                    continue;
                };
                let confirmed = confirm(&mut lines, id).await?;
                directory.delete(id, || confirmed).await;
            }
            (Some("quit"), _) => break,
            (None, _) => continue,
            _ => {
                println!("{HELP}");
                continue;
            }
        }
        println!("{}", directory.state());
    }
    Ok(())
}

async fn confirm(lines: &mut Lines<BufReader<Stdin>>, id: i32) -> std::io::Result<bool> {
    println!("delete user #{id}? [y/N]");
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
