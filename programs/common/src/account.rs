//! Account validation and zero-copy access

use crate::error::HarborError;
use pinocchio::{account_info::AccountInfo, pubkey::Pubkey};

/// Ensure the account is owned by `owner`
#[inline]
pub fn validate_owner(account: &AccountInfo, owner: &Pubkey) -> Result<(), HarborError> {
    if !account.is_owned_by(owner) {
        return Err(HarborError::InvalidAccountOwner);
    }
    Ok(())
}

#[inline]
pub fn validate_writable(account: &AccountInfo) -> Result<(), HarborError> {
    if !account.is_writable() {
        return Err(HarborError::AccountNotWritable);
    }
    Ok(())
}

#[inline]
pub fn validate_signer(account: &AccountInfo) -> Result<(), HarborError> {
    if !account.is_signer() {
        return Err(HarborError::MissingSignature);
    }
    Ok(())
}

/// Ensure the account is exactly `expected`
#[inline]
pub fn validate_key(account: &AccountInfo, expected: &Pubkey) -> Result<(), HarborError> {
    if account.key() != expected {
        return Err(HarborError::InvalidAccount);
    }
    Ok(())
}

/// Borrow account data as `&T`.
///
/// # Safety
///
/// `T` must be `#[repr(C)]`, valid for any bit pattern, and no mutable
/// borrow of the same account may be alive.
#[inline]
pub unsafe fn borrow_account_data<T>(account: &AccountInfo) -> Result<&T, HarborError> {
    if account.data_len() < core::mem::size_of::<T>() {
        return Err(HarborError::AccountDataTooSmall);
    }
    let data = account.borrow_data_unchecked();
    Ok(&*(data.as_ptr() as *const T))
}

/// Borrow account data as `&mut T`.
///
/// # Safety
///
/// Same requirements as [`borrow_account_data`], and no other borrow of the
/// same account may be alive.
#[inline]
pub unsafe fn borrow_account_data_mut<T>(account: &AccountInfo) -> Result<&mut T, HarborError> {
    if account.data_len() < core::mem::size_of::<T>() {
        return Err(HarborError::AccountDataTooSmall);
    }
    let data = account.borrow_mut_data_unchecked();
    Ok(&mut *(data.as_mut_ptr() as *mut T))
}
