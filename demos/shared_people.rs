use google_location_sharing::LocationSharingClient;
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let cookies_path = std::env::var("COOKIES_FILE").expect("COOKIES_FILE missing");
    let authuser = std::env::var("AUTHUSER")
        .ok()
        .and_then(|authuser| authuser.parse::<u32>().ok())
        .unwrap_or(0);
    let client = LocationSharingClient::from_cookies_file(cookies_path, authuser).await?;

    // Pass a nickname or full name to look up a single person.
    if let Some(query) = std::env::args().nth(1) {
        let person = match client.person_by_nickname(&query).await? {
            Some(person) => Some(person),
            None => client.person_by_full_name(&query).await?,
        };

        match person {
            Some(person) => println!("{person}"),
            None => println!("{} is not sharing their location", query.bold()),
        }

        return Ok(());
    }

    let people = client.fetch_shared_people().await?;

    println!("Fetched {} people", people.len().bold());

    for person in people {
        println!("\n{person}");
    }

    Ok(())
}
