use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

struct BertEncoderImpl {
    bert: BertModel,
}

impl BertEncoderImpl {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), config)?
        } else {
            BertModel::load(vb.clone(), config)?
        };

        Ok(Self { bert })
    }

    fn forward_pooled(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        // First-token (CLS) pooling as the document-level representation.
        output.i((.., 0, ..))
    }
}

/// BERT-style encoder that pools the first-token hidden state.
#[derive(Clone)]
pub struct BertEncoder(std::sync::Arc<BertEncoderImpl>);

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let model = BertEncoderImpl::load(vb, &config)?;

        Ok(Self(std::sync::Arc::new(model)))
    }

    /// Returns the pooled representation, shape `[batch, hidden_size]`.
    pub fn forward_pooled(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.0
            .forward_pooled(input_ids, token_type_ids, attention_mask)
    }
}
