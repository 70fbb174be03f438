use crate::{
    db::{
        categories::{Categories, Category},
        db::Db,
    },
    libs::{messages::Message, view::View},
    msg_error, msg_error_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// List categories by name
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add a category
    Add {
        name: String,
        #[arg(short, long, default_value = "")]
        icon: String,
        #[arg(short, long, default_value = "")]
        color: String,
    },
    /// Delete a category by id or name
    Delete {
        category: String,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: CategoryArgs) -> Result<()> {
    let db = Db::new()?;
    let categories = Categories::new(&db);

    match args.command {
        CategoryCommand::List { json } => {
            let list = categories.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else if list.is_empty() {
                msg_info!(Message::NoCategoriesFound);
            } else {
                msg_print!(Message::CategoriesHeader, true);
                View::categories(&list);
            }
        }
        CategoryCommand::Add { name, icon, color } => {
            if categories.get_by_name(&name)?.is_some() {
                msg_error!(Message::CategoryAlreadyExists(name));
                return Ok(());
            }
            match categories.create(&name, &icon, &color) {
                Ok(category) => msg_success!(Message::CategoryCreated(category.name)),
                Err(err) if err.is_validation() => msg_error!(err),
                Err(err) => return Err(msg_error_anyhow!(err)),
            }
        }
        CategoryCommand::Delete { category, yes } => {
            let Some(found) = resolve(&categories, &category)? else {
                msg_error!(Message::CategoryNotFound(category));
                return Ok(());
            };

            let referencing = categories.problem_count(found.id)?;
            if referencing > 0 {
                msg_warning!(Message::CategoryStillReferenced(found.name.clone(), referencing));
            }

            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteCategory(found.name.clone()).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }

            categories.delete(found.id)?;
            msg_success!(Message::CategoryDeleted(found.name));
        }
    }

    Ok(())
}

/// Numeric arguments are tried as an id first, then as a name.
fn resolve(categories: &Categories, key: &str) -> Result<Option<Category>> {
    if let Ok(id) = key.parse::<i64>() {
        if let Some(category) = categories.get_by_id(id)? {
            return Ok(Some(category));
        }
    }
    Ok(categories.get_by_name(key)?)
}
