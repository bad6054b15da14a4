//! Customer address book endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use common::AddressId;
use domain::{Address, AddressPayload, reassign_defaults};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

use super::{AppState, BackingStore, current_customer};

/// Request body wrapping an address payload.
#[derive(Debug, Deserialize)]
pub struct SaveAddressRequest {
    pub address: AddressPayload,
}

/// Request body for address deletion.
#[derive(Debug, Deserialize)]
pub struct DeleteAddressRequest {
    pub address: AddressRef,
}

#[derive(Debug, Deserialize)]
pub struct AddressRef {
    pub id: AddressId,
}

#[derive(Debug, Serialize)]
pub struct DeleteAddressResponse {
    pub message: &'static str,
}

/// GET /addresses — list the authenticated customer's addresses.
#[tracing::instrument(skip(state, headers))]
pub async fn list<S: BackingStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Json<Vec<AddressPayload>>, ApiError> {
    let customer = current_customer(&state.store, &headers).await?;

    let addresses = state.store.find_addresses_for_customer(customer.id).await?;
    let payloads = addresses
        .iter()
        .map(|address| state.normalizer.to_payload(address, &customer))
        .collect();

    Ok(Json(payloads))
}

/// GET /addresses/{id} — fetch a single owned address.
#[tracing::instrument(skip(state, headers))]
pub async fn get<S: BackingStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<AddressPayload>, ApiError> {
    let customer = current_customer(&state.store, &headers).await?;
    let address_id = AddressId::from_uuid(id);

    let address = state
        .store
        .find_address(address_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Address {address_id} does not exist")))?;

    if !address.is_owned_by(customer.id) {
        return Err(ApiError::Forbidden(
            "The address does not belong to this customer".to_string(),
        ));
    }

    Ok(Json(state.normalizer.to_payload(&address, &customer)))
}

/// POST /addresses — create or update an address, keyed on payload `id`.
///
/// Normalizes the payload, persists the address, and reassigns the
/// customer's default-address pointers, persisting only the pointers that
/// changed. Returns the refreshed DTO.
#[tracing::instrument(skip(state, headers, request))]
pub async fn save<S: BackingStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(request): Json<SaveAddressRequest>,
) -> Result<Json<AddressPayload>, ApiError> {
    let mut customer = current_customer(&state.store, &headers).await?;
    let payload = request.address;

    // Resolve the id to an existing aggregate, or start a fresh one. An id
    // that resolves to nothing falls through to creation.
    let mut address = match payload.id {
        Some(id) => match state.store.find_address(id).await? {
            Some(existing) => {
                if !existing.is_owned_by(customer.id) {
                    return Err(ApiError::Forbidden(
                        "The address does not belong to this customer".to_string(),
                    ));
                }
                existing
            }
            None => Address::new_for(customer.id),
        },
        None => Address::new_for(customer.id),
    };

    state
        .normalizer
        .normalize(&mut address, &payload, &customer)?;

    let saved_id = state.store.save_address(&address).await?;
    address.id = Some(saved_id);

    let update = reassign_defaults(&mut customer, &address);
    if update.any() {
        state
            .store
            .update_default_addresses(&customer, update)
            .await?;
    }

    // Return the refreshed record, not the in-flight one.
    let refreshed = state
        .store
        .find_address(saved_id)
        .await?
        .ok_or_else(|| ApiError::Internal("Address disappeared after save".to_string()))?;

    Ok(Json(state.normalizer.to_payload(&refreshed, &customer)))
}

/// POST /addresses/delete — delete an owned address by id.
#[tracing::instrument(skip(state, headers, request))]
pub async fn delete<S: BackingStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(request): Json<DeleteAddressRequest>,
) -> Result<Json<DeleteAddressResponse>, ApiError> {
    let customer = current_customer(&state.store, &headers).await?;
    let address_id = request.address.id;

    let address = state
        .store
        .find_address(address_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Address {address_id} does not exist")))?;

    if !address.is_owned_by(customer.id) {
        return Err(ApiError::Forbidden(
            "The address does not belong to this customer".to_string(),
        ));
    }

    state.store.delete_address(address_id).await?;

    Ok(Json(DeleteAddressResponse {
        message: "The address has been deleted",
    }))
}
