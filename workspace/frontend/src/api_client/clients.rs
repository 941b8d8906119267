use async_trait::async_trait;
use common::{Client, ClientList, CreateClientRequest, IndustryTreemap, ProvincePie, UserContext};
use compute::{FetchContext, GatewayError, RowSource};
use serde_json::Value;
use crate::api_client;

/// Clients table rows
pub struct ClientSource;

#[async_trait(?Send)]
impl RowSource<Client> for ClientSource {
    async fn fetch_rows(&self, ctx: &FetchContext) -> Result<Vec<Client>, GatewayError> {
        get_clients(ctx).await
    }
}

pub async fn get_clients(ctx: &FetchContext) -> Result<Vec<Client>, GatewayError> {
    log::trace!("Fetching clients for {}", ctx.user.username);
    let list: ClientList = api_client::get("/clients/clients", ctx).await?;
    log::info!("Fetched {} clients", list.clients.len());
    Ok(list.clients)
}

pub async fn get_industry_treemap(ctx: &FetchContext) -> Result<IndustryTreemap, GatewayError> {
    log::trace!("Fetching client industry treemap");
    api_client::get("/clients/industry-treemap-chart", ctx).await
}

pub async fn get_province_pie(ctx: &FetchContext) -> Result<ProvincePie, GatewayError> {
    log::trace!("Fetching client province pie");
    api_client::get("/clients/province-pie-chart", ctx).await
}

/// Create a client owned by the signed-in user
pub async fn create_client(user: &UserContext, request: &CreateClientRequest) -> Result<(), GatewayError> {
    log::info!("Creating client: {}", request.client_name);
    let _: Value = api_client::post("/clients/clients", Some(&user.token), request).await?;
    Ok(())
}

pub async fn delete_client(user: &UserContext, client_id: i32) -> Result<(), GatewayError> {
    log::info!("Deleting client with ID: {}", client_id);
    let endpoint = format!("/clients/clients/{}", client_id);
    let _: Value = api_client::delete(&endpoint, &user.token).await?;
    Ok(())
}
