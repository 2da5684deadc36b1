use clap::Subcommand;

use super::CmdResult;

#[derive(Subcommand)]
pub enum SitesAction {
    /// List blocked sites
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a site to the blocked list (input is normalized; invalid
    /// domains are rejected)
    Add {
        /// Domain, e.g. "example.com"
        site: String,
    },
    /// Remove a site from the blocked list
    Remove {
        /// Domain, e.g. "example.com"
        site: String,
    },
}

pub async fn run(action: SitesAction) -> CmdResult {
    let ctl = super::controller().await?;
    match action {
        SitesAction::List { json } => {
            let sites = ctl.state().await.blocked_sites;
            if json {
                println!("{}", serde_json::to_string_pretty(&sites)?);
            } else {
                for site in sites {
                    println!("{site}");
                }
            }
        }
        SitesAction::Add { site } => {
            let sites = ctl.add_site(&site).await?;
            println!("blocked ({} sites)", sites.len());
        }
        SitesAction::Remove { site } => {
            let sites = ctl.remove_site(&site).await;
            println!("ok ({} sites)", sites.len());
        }
    }
    Ok(())
}
