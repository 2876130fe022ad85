//! Company management

use crate::error::{Error, Result};
use crate::store::Store;

use super::models::{Company, CompanyInput, DEFAULT_PERIODICITY};

fn required_name(input: &CompanyInput) -> Result<String> {
    match input.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(Error::validation("Company name is required.")),
    }
}

/// Create a company. Only the name is required.
pub async fn create_company(store: &dyn Store, input: CompanyInput) -> Result<Company> {
    let name = required_name(&input)?;

    let company = Company {
        name,
        location: input.location,
        linkedin: input.linkedin,
        emails: input.emails.unwrap_or_default(),
        phones: input.phones.unwrap_or_default(),
        comments: input.comments,
        communication_periodicity: input
            .communication_periodicity
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PERIODICITY.to_string()),
        ..Company::new("")
    };

    store.insert_company(&company).await?;
    tracing::info!("Created company {} ({})", company.name, company.id);
    Ok(company)
}

pub async fn list_companies(store: &dyn Store) -> Result<Vec<Company>> {
    store.list_companies().await
}

/// Update a company. The name is required again; any other field left out
/// of `input` keeps its stored value.
pub async fn update_company(store: &dyn Store, id: &str, input: CompanyInput) -> Result<Company> {
    let name = required_name(&input)?;

    let mut company = store
        .get_company(id)
        .await?
        .ok_or_else(|| Error::not_found("Company not found."))?;

    company.name = name;
    if let Some(location) = input.location {
        company.location = Some(location);
    }
    if let Some(linkedin) = input.linkedin {
        company.linkedin = Some(linkedin);
    }
    if let Some(emails) = input.emails {
        company.emails = emails;
    }
    if let Some(phones) = input.phones {
        company.phones = phones;
    }
    if let Some(comments) = input.comments {
        company.comments = Some(comments);
    }
    if let Some(periodicity) = input.communication_periodicity {
        company.communication_periodicity = periodicity;
    }

    // the company may have been deleted since the read above
    if !store.update_company(&company).await? {
        return Err(Error::not_found("Company not found."));
    }

    Ok(company)
}

/// Delete a company. Its communication logs are not touched.
pub async fn delete_company(store: &dyn Store, id: &str) -> Result<()> {
    if !store.delete_company(id).await? {
        return Err(Error::not_found("Company not found."));
    }
    tracing::info!("Deleted company {}", id);
    Ok(())
}
