//! Request plumbing shared by both product services.

// self
use crate::{
	_prelude::*,
	auth::Authenticator,
	config::Config,
	http::{
		ApiRequest, ApiResponse, Dispatcher, IDEMPOTENCY_KEY_HEADER, REFERENCE_ID_HEADER,
		SUBSCRIPTION_KEY_HEADER, TARGET_ENVIRONMENT_HEADER,
	},
	model::{
		AccountHolderInfo, Balance, ExternalId, MsisdnNormalizer, Party, PartyIdType, PartyRole,
		ReferenceId, TransactionOptions, TransactionPayload, TransactionStatusRecord,
	},
	obs::{self, Operation},
	product::Product,
};

/// Dependencies every product service needs.
#[derive(Clone)]
pub(crate) struct ProductService {
	pub(crate) product: Product,
	pub(crate) config: Arc<Config>,
	pub(crate) dispatcher: Dispatcher,
	pub(crate) authenticator: Arc<Authenticator>,
	pub(crate) normalizer: Arc<dyn MsisdnNormalizer>,
}
impl ProductService {
	pub(crate) async fn initiate(
		&self,
		party: Party,
		amount: Decimal,
		options: TransactionOptions,
	) -> Result<ReferenceId> {
		let product = self.product;

		obs::observe(Some(product), Operation::Initiate, async move {
			let token = self.authenticator.access_token(product).await?;
			let reference_id = options.reference_id.unwrap_or_else(ReferenceId::generate);
			let party = self.normalize_party(party);
			let (payer, payee) = match product.counterparty_role() {
				PartyRole::Payer => (Some(party), None),
				PartyRole::Payee => (None, Some(party)),
			};
			let payload = TransactionPayload {
				amount: TransactionPayload::format_amount(amount),
				currency: non_empty(options.currency)
					.unwrap_or_else(|| self.config.currency.clone()),
				external_id: options.external_id.unwrap_or_else(ExternalId::generate),
				payer,
				payee,
				payer_message: non_empty(options.payer_message)
					.unwrap_or_else(|| product.default_payer_message().to_owned()),
				payee_note: non_empty(options.payee_note)
					.unwrap_or_else(|| product.default_payee_note().to_owned()),
			};
			let request = ApiRequest::post(product.api_path(product.transaction_resource()))
				.header(REFERENCE_ID_HEADER, reference_id.as_str())
				.header_opt(IDEMPOTENCY_KEY_HEADER, non_empty(options.idempotency_key))
				.json(&payload)?;

			self.send(request, token.expose()).await?;

			Ok(reference_id)
		})
		.await
	}

	pub(crate) async fn status(
		&self,
		reference_id: &ReferenceId,
	) -> Result<TransactionStatusRecord> {
		let product = self.product;

		obs::observe(Some(product), Operation::TransactionStatus, async move {
			let token = self.authenticator.access_token(product).await?;
			let request = ApiRequest::get(product.api_path(product.transaction_resource()))
				.segment(reference_id.as_str());

			self.send(request, token.expose()).await?.json()
		})
		.await
	}

	pub(crate) async fn balance(&self) -> Result<Balance> {
		let product = self.product;

		obs::observe(Some(product), Operation::Balance, async move {
			let token = self.authenticator.access_token(product).await?;

			self.send(ApiRequest::get(product.api_path("account/balance")), token.expose())
				.await?
				.json()
		})
		.await
	}

	pub(crate) async fn account_holder(&self, phone: &str) -> Result<AccountHolderInfo> {
		let product = self.product;

		obs::observe(Some(product), Operation::AccountHolder, async move {
			let token = self.authenticator.access_token(product).await?;
			let request = ApiRequest::get(product.api_path("accountholder/MSISDN"))
				.segment(self.normalizer.normalize(phone))
				.segment("basicuserinfo");

			self.send(request, token.expose()).await?.json()
		})
		.await
	}

	fn normalize_party(&self, party: Party) -> Party {
		match party.party_id_type {
			PartyIdType::Msisdn =>
				Party { party_id: self.normalizer.normalize(&party.party_id), ..party },
			_ => party,
		}
	}

	async fn send(&self, request: ApiRequest, token: &str) -> Result<ApiResponse> {
		let request = request
			.header("Authorization", format!("Bearer {token}"))
			.header(TARGET_ENVIRONMENT_HEADER, self.config.target_environment.as_str())
			.header(SUBSCRIPTION_KEY_HEADER, self.product.subscription_key(&self.config));

		self.dispatcher.send(request).await
	}
}
impl Debug for ProductService {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProductService")
			.field("product", &self.product)
			.field("dispatcher", &self.dispatcher)
			.finish_non_exhaustive()
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|value| !value.is_empty())
}
