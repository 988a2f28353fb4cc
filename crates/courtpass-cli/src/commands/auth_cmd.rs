use courtpass_core::auth::AuthProvider;
use courtpass_core::session::AppRoute;
use courtpass_core::Session;

use crate::cli::{AuthCommands, GlobalOptions};
use crate::commands::common::build_container;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, options: &GlobalOptions) -> Result<(), CliError> {
    match command {
        AuthCommands::Login { provider, id_token } => {
            let container = build_container(options, id_token)?;
            let provider = AuthProvider::from(provider);
            match container.sign_in_service().sign_in(provider).await {
                Ok(user) => {
                    container.session().flush().await?;
                    println!("Signed in as {} <{}> via {provider}", user.name, user.email);
                    Ok(())
                }
                Err(error) if error.is_cancelled() => {
                    println!("Sign-in cancelled");
                    Ok(())
                }
                Err(error) => Err(error.into()),
            }
        }
        AuthCommands::Status => {
            let container = build_container(options, None)?;
            let session = container.session().current().await?;
            let route = container.session().resolve_start_route().await;
            println!("{}", format_status(&session, route));
            Ok(())
        }
        AuthCommands::Logout => {
            let container = build_container(options, None)?;
            container.sign_in_service().sign_out()?;
            container.session().flush().await?;
            println!("Signed out");
            Ok(())
        }
    }
}

pub fn format_status(session: &Session, route: AppRoute) -> String {
    let screen = match route {
        AppRoute::Auth => "sign-in",
        AppRoute::Home => "home",
    };
    match (&session.user, session.is_signed_in()) {
        (Some(user), true) => {
            format!("Signed in as {} <{}> (opens on {screen})", user.name, user.email)
        }
        (None, true) => format!("Signed in, no stored profile (opens on {screen})"),
        (_, false) => format!("Not signed in (opens on {screen})"),
    }
}
